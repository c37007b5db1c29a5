// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persisted records and the filter/update vocabulary used to query them.

use serde::{Deserialize, Serialize};

use crate::types::{ChatId, Profile, UserId};

/// Default cool-down between elections: four hours.
pub const DEFAULT_LOCK_SECONDS: i64 = 4 * 3600;

/// Default cap on credit for a single election span: one day.
pub const DEFAULT_MAX_CHOSEN_SECONDS: i64 = 24 * 3600;

/// Decimal places kept when a rating is persisted.
pub const RATING_PRECISION: i32 = 5;

/// Round a rating to [`RATING_PRECISION`] decimal places.
pub fn round_rating(rating: f64) -> f64 {
    let scale = 10f64.powi(RATING_PRECISION);
    (rating * scale).round() / scale
}

/// One participant of one conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub chat_id: ChatId,
    pub profile: Profile,
    pub left: bool,
    pub blocked: bool,
    pub noping: bool,
    /// Selection weight; always positive.
    pub rating: f64,
    /// Total honor time credited across all finished spans.
    pub chosen_ms: i64,
}

impl UserRecord {
    /// A freshly observed participant.
    pub fn new(chat_id: ChatId, profile: Profile, left: bool) -> Self {
        Self {
            chat_id,
            profile,
            left,
            blocked: false,
            noping: false,
            rating: 1.0,
            chosen_ms: 0,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.profile.id
    }

    /// Participates in draws.
    pub fn is_eligible(&self) -> bool {
        !self.left && !self.blocked
    }
}

/// The most recent election of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chosen {
    pub user_id: UserId,
    /// Election time, milliseconds since the Unix epoch.
    pub at_ms: i64,
    /// Cool-down in force when the election happened.
    pub lock_seconds: i64,
}

/// Per-conversation election state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRecord {
    pub chat_id: ChatId,
    pub chosen: Option<Chosen>,
    pub lock_seconds: i64,
    pub max_chosen_seconds: i64,
}

impl ChatRecord {
    /// In-memory stand-in for a conversation that has never held an election.
    pub fn fresh(chat_id: ChatId, lock_seconds: i64, max_chosen_seconds: i64) -> Self {
        Self {
            chat_id,
            chosen: None,
            lock_seconds,
            max_chosen_seconds,
        }
    }
}

/// Selects user records. Unset fields match anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserFilter {
    pub chat_id: ChatId,
    pub user_id: Option<UserId>,
    pub left: Option<bool>,
    pub blocked: Option<bool>,
}

impl UserFilter {
    /// Every user of a conversation.
    pub fn chat(chat_id: ChatId) -> Self {
        Self {
            chat_id,
            user_id: None,
            left: None,
            blocked: None,
        }
    }

    /// One user of a conversation.
    pub fn user(chat_id: ChatId, user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::chat(chat_id)
        }
    }

    /// Users still present in the conversation.
    pub fn present(chat_id: ChatId) -> Self {
        Self {
            left: Some(false),
            ..Self::chat(chat_id)
        }
    }

    /// Users taking part in draws.
    pub fn eligible(chat_id: ChatId) -> Self {
        Self {
            left: Some(false),
            blocked: Some(false),
            ..Self::chat(chat_id)
        }
    }
}

/// Partial update of user records: `Some` fields are set, `add_chosen_ms`
/// is added to the accumulator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserUpdate {
    pub profile: Option<Profile>,
    pub left: Option<bool>,
    pub blocked: Option<bool>,
    pub noping: Option<bool>,
    pub rating: Option<f64>,
    pub add_chosen_ms: Option<i64>,
}

impl UserUpdate {
    pub fn blocked(blocked: bool) -> Self {
        Self {
            blocked: Some(blocked),
            ..Self::default()
        }
    }

    pub fn noping(noping: bool) -> Self {
        Self {
            noping: Some(noping),
            ..Self::default()
        }
    }

    pub fn left(left: bool) -> Self {
        Self {
            left: Some(left),
            ..Self::default()
        }
    }

    pub fn rating(rating: f64) -> Self {
        Self {
            rating: Some(rating),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Result of an update: how many records matched and how many actually changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

impl UpdateOutcome {
    /// At least one record matched and changed.
    pub fn changed(&self) -> bool {
        self.matched > 0 && self.modified > 0
    }
}

/// Everything persisted when a new honor participant is elected.
#[derive(Debug, Clone, PartialEq)]
pub struct ElectionCommit {
    /// Chat state after the election, including the new `chosen`.
    pub chat: ChatRecord,
    /// Time credited to the previous holder, when there was one.
    pub credit: Option<(UserId, i64)>,
}
