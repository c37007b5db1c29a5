// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StorageAdapter trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use honorbot_config::model::StorageConfig;
use honorbot_core::{
    ChatId, ChatRecord, ElectionCommit, HealthStatus, HonorError, PluginAdapter,
    StorageAdapter, UpdateOutcome, UserFilter, UserRecord, UserUpdate,
};

use crate::database::{Database, map_tr_err};
use crate::queries;

/// SQLite-backed document store.
///
/// The database is opened by whichever operation runs first; concurrent
/// first callers wait on the same initialization and share its outcome.
/// A failed open is not cached, so the next operation retries.
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create the adapter without touching the filesystem.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Whether a connection has been established.
    pub fn is_connected(&self) -> bool {
        self.db.initialized()
    }

    async fn db(&self) -> Result<&Database, HonorError> {
        self.db
            .get_or_try_init(|| async {
                debug!(path = %self.config.database_path, "opening SQLite store");
                Database::open(&self.config.database_path, self.config.wal_mode).await
            })
            .await
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    async fn health_check(&self) -> Result<HealthStatus, HonorError> {
        let Some(db) = self.db.get() else {
            return Ok(HealthStatus::Degraded("not connected yet".into()));
        };
        let probe = db
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err);
        Ok(match probe {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        })
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), HonorError> {
        self.db().await.map(|_| ())
    }

    async fn close(&self) -> Result<(), HonorError> {
        match self.db.get() {
            Some(db) => db.checkpoint().await,
            None => Ok(()),
        }
    }

    async fn ensure_collection(&self, name: &str) -> Result<(), HonorError> {
        if self.db().await?.has_table(name) {
            Ok(())
        } else {
            Err(HonorError::UnknownCollection {
                name: name.to_string(),
            })
        }
    }

    async fn find_users(&self, filter: &UserFilter) -> Result<Vec<UserRecord>, HonorError> {
        queries::users::find_users(self.db().await?, filter).await
    }

    async fn insert_user(&self, user: &UserRecord) -> Result<(), HonorError> {
        queries::users::insert_user(self.db().await?, user).await
    }

    async fn update_user(
        &self,
        filter: &UserFilter,
        update: &UserUpdate,
    ) -> Result<UpdateOutcome, HonorError> {
        queries::users::update_user(self.db().await?, filter, update).await
    }

    async fn update_users(
        &self,
        filter: &UserFilter,
        update: &UserUpdate,
    ) -> Result<UpdateOutcome, HonorError> {
        queries::users::update_users(self.db().await?, filter, update).await
    }

    async fn migrate_chat(&self, from: ChatId, to: ChatId) -> Result<UpdateOutcome, HonorError> {
        queries::users::migrate_chat(self.db().await?, from, to).await
    }

    async fn find_chat(&self, chat_id: ChatId) -> Result<Option<ChatRecord>, HonorError> {
        queries::chats::find_chat(self.db().await?, chat_id).await
    }

    async fn record_election(&self, commit: &ElectionCommit) -> Result<(), HonorError> {
        queries::chats::record_election(self.db().await?, commit).await
    }
}
