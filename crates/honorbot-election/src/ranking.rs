// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `/top` ranking.
//!
//! The current holder is shown with the credit they would receive if a new
//! election happened right now. That credit is display-only: it is computed
//! from the stored election time and never written back.

use honorbot_core::{ChatRecord, UserRecord};

use crate::lock::elapsed_credit;
use crate::rating::relative_ratings;

/// Remainders below this are treated as elapsed.
const DISPLAY_THRESHOLD_MS: i64 = 1_000;

#[derive(Debug, Clone, PartialEq)]
pub struct RankEntry {
    /// The user, with `chosen_ms` including any pending credit.
    pub user: UserRecord,
    /// Rating relative to everyone in the ranking.
    pub relative: f64,
    /// Time left in the lock window; zero for everyone but the holder.
    pub lock_left_ms: i64,
    /// Time the holder can still accrue before the credit cap; zero for
    /// everyone else.
    pub accrual_left_ms: i64,
}

impl RankEntry {
    pub fn is_locked(&self) -> bool {
        self.lock_left_ms >= DISPLAY_THRESHOLD_MS
    }

    pub fn is_accruing(&self) -> bool {
        self.accrual_left_ms >= DISPLAY_THRESHOLD_MS
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ranking {
    pub entries: Vec<RankEntry>,
}

impl Ranking {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Some entry is still inside the lock window.
    pub fn lock_active(&self) -> bool {
        self.entries.iter().any(RankEntry::is_locked)
    }

    /// Some entry is still accruing honor time.
    pub fn holder_accruing(&self) -> bool {
        self.entries.iter().any(RankEntry::is_accruing)
    }
}

/// Build the ranking from the users still present in a conversation.
///
/// Entries are sorted by accumulated time, longest first; ties keep storage
/// order.
pub fn rank(users: Vec<UserRecord>, chat: &ChatRecord, now_ms: i64) -> Ranking {
    let ratings: Vec<f64> = users.iter().map(|u| u.rating).collect();
    let relative = relative_ratings(&ratings);

    let mut entries: Vec<RankEntry> = users
        .into_iter()
        .zip(relative)
        .map(|(mut user, relative)| {
            let mut entry_lock = 0;
            let mut entry_accrual = 0;
            if let Some(chosen) = chat.chosen
                && chosen.user_id == user.user_id()
            {
                user.chosen_ms += elapsed_credit(&chosen, chat.max_chosen_seconds, now_ms);
                entry_lock = chosen.at_ms + chosen.lock_seconds * 1000 - now_ms;
                entry_accrual = chosen.at_ms + chat.max_chosen_seconds * 1000 - now_ms;
            }
            RankEntry {
                user,
                relative,
                lock_left_ms: entry_lock,
                accrual_left_ms: entry_accrual,
            }
        })
        .collect();

    entries.sort_by(|a, b| b.user.chosen_ms.cmp(&a.user.chosen_ms));
    Ranking { entries }
}
