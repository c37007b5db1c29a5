// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for the document store holding users and chats.

use async_trait::async_trait;

use crate::error::HonorError;
use crate::records::{ChatRecord, ElectionCommit, UpdateOutcome, UserFilter, UserRecord, UserUpdate};
use crate::traits::adapter::PluginAdapter;
use crate::types::ChatId;

/// Name of the collection holding one record per conversation participant.
pub const USERS_COLLECTION: &str = "users";

/// Name of the collection holding one record per conversation.
pub const CHATS_COLLECTION: &str = "chats";

/// Adapter for the persistent store.
///
/// The connection is established lazily by the first operation and shared
/// by every later one. Each mutation is atomic on its own.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Connects eagerly (migrations, PRAGMAs). Later calls are no-ops.
    async fn initialize(&self) -> Result<(), HonorError>;

    /// Flushes pending writes.
    async fn close(&self) -> Result<(), HonorError>;

    /// Fails with [`HonorError::UnknownCollection`] unless `name` exists.
    async fn ensure_collection(&self, name: &str) -> Result<(), HonorError>;

    // --- users ---

    async fn find_users(&self, filter: &UserFilter) -> Result<Vec<UserRecord>, HonorError>;

    async fn insert_user(&self, user: &UserRecord) -> Result<(), HonorError>;

    /// Updates at most one matching record.
    async fn update_user(
        &self,
        filter: &UserFilter,
        update: &UserUpdate,
    ) -> Result<UpdateOutcome, HonorError>;

    /// Updates every matching record.
    async fn update_users(
        &self,
        filter: &UserFilter,
        update: &UserUpdate,
    ) -> Result<UpdateOutcome, HonorError>;

    /// Moves every user record of `from` to the conversation `to`.
    async fn migrate_chat(&self, from: ChatId, to: ChatId) -> Result<UpdateOutcome, HonorError>;

    // --- chats ---

    async fn find_chat(&self, chat_id: ChatId) -> Result<Option<ChatRecord>, HonorError>;

    /// Stores a new election and credits the previous holder in one step.
    async fn record_election(&self, commit: &ElectionCommit) -> Result<(), HonorError>;
}
