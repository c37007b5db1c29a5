// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-conversation lock window and elapsed-time credit.
//!
//! A conversation is `Locked` from the moment of an election until the
//! cool-down recorded with that election has elapsed. There is no explicit
//! unlock: the state is derived from the stored election time and `now`.

use honorbot_core::{ChatRecord, Chosen, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Unlocked,
    Locked { holder: UserId, remaining_ms: i64 },
}

/// Derive the lock state of a conversation at `now_ms`.
pub fn lock_state(chat: &ChatRecord, now_ms: i64) -> LockState {
    let Some(chosen) = chat.chosen else {
        return LockState::Unlocked;
    };
    let threshold = now_ms - chosen.lock_seconds * 1000;
    if chosen.at_ms > threshold {
        LockState::Locked {
            holder: chosen.user_id,
            remaining_ms: chosen.at_ms - threshold,
        }
    } else {
        LockState::Unlocked
    }
}

/// Honor time earned by the holder of `chosen` up to `now_ms`, capped at
/// `max_chosen_seconds`.
///
/// Always derived from the stored election time, never from a running
/// counter, so recomputing it any number of times yields the same value.
/// Never negative, so accumulated time only grows.
pub fn elapsed_credit(chosen: &Chosen, max_chosen_seconds: i64, now_ms: i64) -> i64 {
    (now_ms - chosen.at_ms)
        .min(max_chosen_seconds * 1000)
        .max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use honorbot_core::ChatId;

    const T: i64 = 1_700_000_000_000;

    fn chat_elected_at(at_ms: i64) -> ChatRecord {
        ChatRecord {
            chosen: Some(Chosen {
                user_id: UserId(9),
                at_ms,
                lock_seconds: 14_400,
            }),
            ..ChatRecord::fresh(ChatId(-1), 14_400, 86_400)
        }
    }

    #[test]
    fn chat_without_election_is_unlocked() {
        let chat = ChatRecord::fresh(ChatId(-1), 14_400, 86_400);
        assert_eq!(lock_state(&chat, T), LockState::Unlocked);
    }

    #[test]
    fn lock_holds_during_cool_down() {
        let chat = chat_elected_at(T);
        match lock_state(&chat, T + 1_000_000) {
            LockState::Locked { holder, remaining_ms } => {
                assert_eq!(holder, UserId(9));
                assert_eq!(remaining_ms, 13_400_000);
            }
            LockState::Unlocked => panic!("should still be locked"),
        }
    }

    #[test]
    fn lock_releases_exactly_at_expiry() {
        let chat = chat_elected_at(T);
        assert!(matches!(lock_state(&chat, T + 14_399_999), LockState::Locked { .. }));
        assert_eq!(lock_state(&chat, T + 14_400_000), LockState::Unlocked);
    }

    #[test]
    fn lock_uses_duration_recorded_with_election() {
        let mut chat = chat_elected_at(T);
        chat.lock_seconds = 10;
        assert!(matches!(lock_state(&chat, T + 60_000), LockState::Locked { .. }));
    }

    #[test]
    fn credit_is_capped() {
        let chosen = chat_elected_at(T).chosen.unwrap();
        assert_eq!(elapsed_credit(&chosen, 86_400, T + 5_000), 5_000);
        assert_eq!(elapsed_credit(&chosen, 86_400, T + 90_000_000), 86_400_000);
    }

    #[test]
    fn credit_is_idempotent_and_never_negative() {
        let chosen = chat_elected_at(T).chosen.unwrap();
        let first = elapsed_credit(&chosen, 86_400, T + 20_000_000);
        let second = elapsed_credit(&chosen, 86_400, T + 20_000_000);
        assert_eq!(first, second);
        assert_eq!(elapsed_credit(&chosen, 86_400, T - 1), 0);
    }
}
