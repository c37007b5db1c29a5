// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One `/choose` request, decided up front.
//!
//! [`run_election`] performs every random draw and computes everything that
//! must be persisted, without touching the store. The caller sends the
//! messages and writes [`Election::commit`] in one step.

use honorbot_core::{ChatRecord, Chosen, ElectionCommit, UserId, UserRecord};
use rand::Rng;

use crate::lock::{LockState, elapsed_credit, lock_state};
use crate::rating::{bump_rating, draw_user};

/// Tunables of an election.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElectionParams {
    /// Chance of the double-draw when at least two users are eligible.
    pub reroll_probability: f64,
    /// Rating added to a requester who did not win.
    pub rating_increment: f64,
}

impl Default for ElectionParams {
    fn default() -> Self {
        Self {
            reroll_probability: 0.4,
            rating_increment: 0.2,
        }
    }
}

/// Rating change granted to a requester who was not elected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Consolation {
    pub user_id: UserId,
    /// New rating, already rounded for storage.
    pub rating: f64,
    /// New rating relative to the eligible set.
    pub relative: f64,
}

/// A decided election.
#[derive(Debug, Clone, PartialEq)]
pub struct Election {
    /// First-draw winner that the double-draw overturns, if it happened.
    pub provisional: Option<UserRecord>,
    pub winner: UserRecord,
    /// Cool-down the winner holds the title for, in seconds.
    pub lock_seconds: i64,
    pub commit: ElectionCommit,
    pub consolation: Option<Consolation>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElectionOutcome {
    /// The current holder is still within the lock window. Nothing changes.
    Locked { holder: UserId, remaining_ms: i64 },
    /// Nobody is eligible. Nothing changes.
    NoParticipants,
    Elected(Election),
}

/// Decide a `/choose` request.
///
/// `eligible` must hold the conversation's users with `left = false` and
/// `blocked = false`, in storage order. The previous holder's credit is only
/// computed when an election actually happens, so refused requests never
/// mutate anything.
pub fn run_election<R: Rng + ?Sized>(
    chat: &ChatRecord,
    eligible: &[UserRecord],
    requester: UserId,
    now_ms: i64,
    params: &ElectionParams,
    rng: &mut R,
) -> ElectionOutcome {
    if let LockState::Locked {
        holder,
        remaining_ms,
    } = lock_state(chat, now_ms)
    {
        return ElectionOutcome::Locked {
            holder,
            remaining_ms,
        };
    }

    let Some(first) = draw_user(eligible, None, rng) else {
        return ElectionOutcome::NoParticipants;
    };

    let reroll = eligible.len() >= 2 && rng.gen_bool(params.reroll_probability.clamp(0.0, 1.0));
    let second = if reroll {
        draw_user(eligible, Some(first.user_id()), rng)
    } else {
        None
    };
    let (provisional, winner) = match second {
        Some(second) => (Some(first.clone()), second.clone()),
        None => (None, first.clone()),
    };

    let credit = chat.chosen.map(|previous| {
        (
            previous.user_id,
            elapsed_credit(&previous, chat.max_chosen_seconds, now_ms),
        )
    });

    let commit = ElectionCommit {
        chat: ChatRecord {
            chosen: Some(Chosen {
                user_id: winner.user_id(),
                at_ms: now_ms,
                lock_seconds: chat.lock_seconds,
            }),
            ..chat.clone()
        },
        credit,
    };

    let consolation = (requester != winner.user_id())
        .then(|| consolation_for(eligible, requester, params.rating_increment))
        .flatten();

    ElectionOutcome::Elected(Election {
        provisional,
        winner,
        lock_seconds: chat.lock_seconds,
        commit,
        consolation,
    })
}

/// Bump the requester's rating and express it relative to the eligible set.
///
/// A requester outside the eligible set (left, blocked or never seen) gets
/// nothing.
fn consolation_for(eligible: &[UserRecord], requester: UserId, increment: f64) -> Option<Consolation> {
    let user = eligible.iter().find(|u| u.user_id() == requester)?;
    let rating = bump_rating(user.rating, increment);
    let total: f64 = eligible.iter().map(|u| u.rating).sum::<f64>() - user.rating + rating;
    Some(Consolation {
        user_id: requester,
        rating,
        relative: rating / total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use honorbot_core::{ChatId, Profile};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const NOW: i64 = 1_700_000_000_000;

    fn pool(n: i64) -> Vec<UserRecord> {
        (1..=n)
            .map(|id| UserRecord::new(ChatId(-1), Profile::new(id, "U"), false))
            .collect()
    }

    fn fresh_chat() -> ChatRecord {
        ChatRecord::fresh(ChatId(-1), 14_400, 86_400)
    }

    fn elected(outcome: ElectionOutcome) -> Election {
        match outcome {
            ElectionOutcome::Elected(election) => election,
            other => panic!("expected an election, got {other:?}"),
        }
    }

    #[test]
    fn first_election_credits_nobody() {
        let mut rng = StdRng::seed_from_u64(7);
        let election = elected(run_election(
            &fresh_chat(),
            &pool(3),
            UserId(1),
            NOW,
            &ElectionParams::default(),
            &mut rng,
        ));
        assert_eq!(election.commit.credit, None);
        let chosen = election.commit.chat.chosen.unwrap();
        assert_eq!(chosen.at_ms, NOW);
        assert_eq!(chosen.lock_seconds, 14_400);
        assert_eq!(chosen.user_id, election.winner.user_id());
    }

    #[test]
    fn locked_chat_reports_holder_and_remaining_time() {
        let mut chat = fresh_chat();
        chat.chosen = Some(Chosen {
            user_id: UserId(2),
            at_ms: NOW,
            lock_seconds: 14_400,
        });
        let mut rng = StdRng::seed_from_u64(7);
        let outcome = run_election(
            &chat,
            &pool(3),
            UserId(1),
            NOW + 1_000_000,
            &ElectionParams::default(),
            &mut rng,
        );
        match outcome {
            ElectionOutcome::Locked { holder, remaining_ms } => {
                assert_eq!(holder, UserId(2));
                assert!(remaining_ms >= 13_400_000);
            }
            other => panic!("expected lock, got {other:?}"),
        }
    }

    #[test]
    fn empty_pool_reports_no_participants() {
        let mut rng = StdRng::seed_from_u64(7);
        let outcome = run_election(
            &fresh_chat(),
            &[],
            UserId(1),
            NOW,
            &ElectionParams::default(),
            &mut rng,
        );
        assert_eq!(outcome, ElectionOutcome::NoParticipants);
    }

    #[test]
    fn expired_lock_credits_previous_holder_with_cap() {
        let mut chat = fresh_chat();
        chat.chosen = Some(Chosen {
            user_id: UserId(3),
            at_ms: NOW - 200_000_000,
            lock_seconds: 14_400,
        });
        let mut rng = StdRng::seed_from_u64(1);
        let election = elected(run_election(
            &chat,
            &pool(3),
            UserId(1),
            NOW,
            &ElectionParams::default(),
            &mut rng,
        ));
        assert_eq!(election.commit.credit, Some((UserId(3), 86_400_000)));
    }

    #[test]
    fn forced_reroll_always_overturns_first_draw() {
        let params = ElectionParams {
            reroll_probability: 1.0,
            ..ElectionParams::default()
        };
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let election = elected(run_election(&fresh_chat(), &pool(3), UserId(1), NOW, &params, &mut rng));
            let provisional = election.provisional.expect("double-draw must happen");
            assert_ne!(provisional.user_id(), election.winner.user_id());
        }
    }

    #[test]
    fn single_user_is_never_rerolled() {
        let params = ElectionParams {
            reroll_probability: 1.0,
            ..ElectionParams::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let election = elected(run_election(&fresh_chat(), &pool(1), UserId(1), NOW, &params, &mut rng));
        assert!(election.provisional.is_none());
        assert_eq!(election.winner.user_id(), UserId(1));
        assert!(election.consolation.is_none());
    }

    #[test]
    fn losing_requester_gains_increment() {
        let params = ElectionParams {
            reroll_probability: 0.0,
            ..ElectionParams::default()
        };
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let election = elected(run_election(&fresh_chat(), &pool(3), UserId(1), NOW, &params, &mut rng));
            if election.winner.user_id() == UserId(1) {
                assert!(election.consolation.is_none());
                continue;
            }
            let consolation = election.consolation.expect("loser is consoled");
            assert_eq!(consolation.user_id, UserId(1));
            assert!((consolation.rating - 1.2).abs() < 1e-5);
            assert!((consolation.relative - 1.2 / 3.2).abs() < 1e-9);
        }
    }

    #[test]
    fn requester_outside_pool_is_not_consoled() {
        let params = ElectionParams {
            reroll_probability: 0.0,
            ..ElectionParams::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let election = elected(run_election(&fresh_chat(), &pool(2), UserId(99), NOW, &params, &mut rng));
        assert!(election.consolation.is_none());
    }
}
