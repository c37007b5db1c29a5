// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identifiers and transport-facing types shared across adapter traits.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Stable identifier of a conversation (group or one-to-one dialogue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChatId(pub i64);

/// Stable identifier of a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Whether a conversation is a one-to-one dialogue or a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatKind {
    Private,
    Group,
}

/// Snapshot of a person's public profile as reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub is_bot: bool,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

impl Profile {
    /// Convenience constructor for a human profile with only a first name.
    pub fn new(id: i64, first_name: impl Into<String>) -> Self {
        Self {
            id: UserId(id),
            is_bot: false,
            first_name: first_name.into(),
            last_name: None,
            username: None,
        }
    }
}

/// An inbound event received from the transport.
///
/// Text messages and membership notifications share this shape; the
/// optional fields are empty when the event does not carry them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundEvent {
    pub chat_id: ChatId,
    pub chat_kind: ChatKind,
    pub sender: Profile,
    pub text: Option<String>,
    #[serde(default)]
    pub new_members: Vec<Profile>,
    pub left_member: Option<Profile>,
    pub migrate_to: Option<ChatId>,
}

impl InboundEvent {
    /// A plain text message in the given chat.
    pub fn text(chat_id: ChatId, chat_kind: ChatKind, sender: Profile, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            chat_kind,
            sender,
            text: Some(text.into()),
            new_members: Vec::new(),
            left_member: None,
            migrate_to: None,
        }
    }

    /// True for a one-to-one dialogue with the sender.
    pub fn is_private(&self) -> bool {
        self.chat_kind == ChatKind::Private || self.chat_id.0 == self.sender.id.0
    }
}

/// Formatting applied by the transport to outbound text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFormat {
    /// Legacy Telegram Markdown (`*bold*`, `_italic_`, `` `code` ``, links).
    #[default]
    Markdown,
    /// Text is delivered verbatim.
    Plain,
}

/// Membership status of a person inside a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum MemberStatus {
    Creator,
    Administrator,
    Member,
    Restricted,
    Left,
    Banned,
}

impl MemberStatus {
    /// Creators and administrators may manage participants.
    pub fn is_admin(self) -> bool {
        matches!(self, MemberStatus::Creator | MemberStatus::Administrator)
    }
}

/// The bot's own account as reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotIdentity {
    pub id: UserId,
    pub username: String,
}
