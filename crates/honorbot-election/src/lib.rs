// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Selection engine for Honorbot.
//!
//! Everything here is pure computation over records loaded by the caller:
//! weighted draws, the per-conversation lock window, elapsed-time credit,
//! the `/top` ranking and human-readable durations. Randomness and the
//! current time are passed in, so results are reproducible under test.

pub mod elapsed;
pub mod election;
pub mod lock;
pub mod ranking;
pub mod rating;

pub use elapsed::{Case, format_elapsed};
pub use election::{Consolation, Election, ElectionOutcome, ElectionParams, run_election};
pub use lock::{LockState, elapsed_credit, lock_state};
pub use ranking::{RankEntry, Ranking, rank};
pub use rating::{bump_rating, draw_user, format_percent, partition, pick, relative_ratings};
