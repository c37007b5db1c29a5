// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Honorbot.
//!
//! This crate provides the error type, identifiers, persisted record types
//! and the two adapter traits (transport and store) that every other crate
//! in the workspace builds on.

pub mod clock;
pub mod error;
pub mod records;
pub mod traits;
pub mod types;

pub use clock::{Clock, SystemClock};
pub use error::HonorError;
pub use records::{
    ChatRecord, Chosen, ElectionCommit, UpdateOutcome, UserFilter, UserRecord, UserUpdate,
};
pub use traits::{CHATS_COLLECTION, ChannelAdapter, PluginAdapter, StorageAdapter, USERS_COLLECTION};
pub use types::{
    BotIdentity, ChatId, ChatKind, HealthStatus, InboundEvent, MemberStatus, Profile,
    TextFormat, UserId,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn honor_error_variants_render() {
        assert_eq!(
            HonorError::Config("missing token".into()).to_string(),
            "configuration error: missing token"
        );
        assert_eq!(
            HonorError::UnknownCollection { name: "votes".into() }.to_string(),
            "there is no such collection as `votes`"
        );
        assert_eq!(HonorError::storage("disk full").to_string(), "storage error: disk full");
        assert_eq!(HonorError::Internal("oops".into()).to_string(), "internal error: oops");
    }

    #[test]
    fn channel_closed_detection() {
        assert!(HonorError::ChannelClosed("inbound stream ended".into()).is_channel_closed());
        assert!(!HonorError::channel("timeout").is_channel_closed());
        assert!(!HonorError::channel("connection closed by peer").is_channel_closed());
        assert!(!HonorError::Internal("closed".into()).is_channel_closed());
        assert_eq!(
            HonorError::ChannelClosed("inbound stream ended".into()).to_string(),
            "channel closed: inbound stream ended"
        );
    }

    #[test]
    fn member_status_admin_rights() {
        assert!(MemberStatus::Creator.is_admin());
        assert!(MemberStatus::Administrator.is_admin());
        assert!(!MemberStatus::Member.is_admin());
        assert!(!MemberStatus::Restricted.is_admin());
        assert!(!MemberStatus::Left.is_admin());
        assert_eq!(MemberStatus::Administrator.to_string(), "administrator");
    }

    #[test]
    fn private_event_detection() {
        let sender = Profile::new(42, "Ann");
        let private = InboundEvent::text(ChatId(42), ChatKind::Private, sender.clone(), "/help");
        let group = InboundEvent::text(ChatId(-100), ChatKind::Group, sender, "/help");
        assert!(private.is_private());
        assert!(!group.is_private());
    }

    #[test]
    fn all_trait_modules_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_channel_adapter<T: ChannelAdapter>() {}
        fn _assert_storage_adapter<T: StorageAdapter>() {}
    }
}
