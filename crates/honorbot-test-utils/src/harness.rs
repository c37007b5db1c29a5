// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixtures shared by integration tests: a throwaway SQLite store and
//! sample events.

use std::sync::Arc;

use honorbot_config::model::StorageConfig;
use honorbot_core::{ChatId, ChatKind, HonorError, InboundEvent, Profile, StorageAdapter};
use honorbot_storage::SqliteStorage;

/// A SQLite store living in a temporary directory.
///
/// The directory is removed when the value is dropped, so keep it alive for
/// as long as the store is used.
pub struct TempStore {
    _dir: tempfile::TempDir,
    pub config: StorageConfig,
    pub storage: Arc<SqliteStorage>,
}

impl TempStore {
    /// Create the store without connecting it.
    pub fn lazy() -> Result<Self, HonorError> {
        let dir = tempfile::TempDir::new().map_err(|e| HonorError::Storage { source: e.into() })?;
        let config = StorageConfig {
            database_path: dir.path().join("test.db").to_string_lossy().to_string(),
            wal_mode: true,
        };
        let storage = Arc::new(SqliteStorage::new(config.clone()));
        Ok(Self {
            _dir: dir,
            config,
            storage,
        })
    }

    /// Create and connect the store.
    pub async fn open() -> Result<Self, HonorError> {
        let store = Self::lazy()?;
        store.storage.initialize().await?;
        Ok(store)
    }
}

/// A human profile named `User<id>`.
pub fn sample_profile(id: i64) -> Profile {
    Profile::new(id, format!("User{id}"))
}

/// A text message from `user` in `chat`.
///
/// Negative chat ids are groups; a chat id equal to the user id is the
/// private dialogue with that user.
pub fn sample_event(chat: i64, user: i64, text: &str) -> InboundEvent {
    let kind = if chat == user {
        ChatKind::Private
    } else {
        ChatKind::Group
    };
    InboundEvent::text(ChatId(chat), kind, sample_profile(user), text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_events_pick_the_chat_kind() {
        assert!(sample_event(7, 7, "/help").is_private());
        assert!(!sample_event(-100, 7, "/help").is_private());
        assert_eq!(sample_profile(3).first_name, "User3");
    }

    #[tokio::test]
    async fn temp_store_connects() {
        let store = TempStore::open().await.unwrap();
        assert!(store.storage.is_connected());
        store.storage.ensure_collection("users").await.unwrap();
    }
}
