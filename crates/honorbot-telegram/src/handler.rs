// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversion of Telegram messages into channel-agnostic events.
//!
//! Every message with a sender becomes an [`InboundEvent`], including
//! membership notifications without text, so that participant bookkeeping
//! sees joins, departures and group migrations.

use honorbot_core::types::{ChatId, ChatKind, InboundEvent, Profile, UserId};
use teloxide::types::{Message, User};

/// Snapshot of a Telegram user.
pub fn to_profile(user: &User) -> Profile {
    Profile {
        id: UserId(user.id.0 as i64),
        is_bot: user.is_bot,
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        username: user.username.clone(),
    }
}

/// Converts a message into an [`InboundEvent`].
///
/// Messages without a sender (channel posts) yield `None`.
pub fn to_inbound_event(msg: &Message) -> Option<InboundEvent> {
    let sender = msg.from.as_ref()?;
    let chat_kind = if msg.chat.is_private() {
        ChatKind::Private
    } else {
        ChatKind::Group
    };

    Some(InboundEvent {
        chat_id: ChatId(msg.chat.id.0),
        chat_kind,
        sender: to_profile(sender),
        text: msg.text().map(str::to_string),
        new_members: msg
            .new_chat_members()
            .map(|members| members.iter().map(to_profile).collect())
            .unwrap_or_default(),
        left_member: msg.left_chat_member().map(to_profile),
        migrate_to: msg.migrate_to_chat_id().map(|id| ChatId(id.0)),
    })
}
