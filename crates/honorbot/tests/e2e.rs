// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests over a file-backed store that outlives one agent loop.
//!
//! Each test wires the storage, agent and mock channel crates the same way
//! `honorbot serve` does, swapping Telegram for the mock channel.

use std::sync::Arc;
use std::time::Duration;

use honorbot_agent::{AgentLoop, HandlerContext};
use honorbot_config::model::{HonorConfig, StorageConfig};
use honorbot_core::{
    CHATS_COLLECTION, ChannelAdapter, ChatId, Clock, HonorError, StorageAdapter, SystemClock,
    USERS_COLLECTION, UserFilter,
};
use honorbot_storage::SqliteStorage;
use honorbot_test_utils::{MockChannel, sample_event};
use tokio_util::sync::CancellationToken;

const GROUP: i64 = -100;

fn quiet_config(storage: StorageConfig) -> HonorConfig {
    let mut config = HonorConfig::default();
    config.storage = storage;
    config.election.reroll_probability = 0.0;
    config.election.tip_probability = 0.0;
    config.election.suspense_min_ms = 0;
    config.election.suspense_max_ms = 0;
    config
}

/// One `serve` lifetime: feeds the `(user, text)` script, waits for `replies`
/// outbound messages, then shuts down and returns what was sent.
async fn session(config: &HonorConfig, script: &[(i64, &str)], replies: usize) -> Vec<String> {
    let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
    storage.initialize().await.unwrap();
    for collection in [USERS_COLLECTION, CHATS_COLLECTION] {
        storage.ensure_collection(collection).await.unwrap();
    }

    let channel = Arc::new(MockChannel::new());
    let identity = channel.identity().await.unwrap();
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let ctx = HandlerContext::new(channel.clone(), storage, clock, config, identity);
    let agent = Arc::new(AgentLoop::new(ctx, Duration::from_secs(5)));

    let cancel = CancellationToken::new();
    let runner = {
        let agent = agent.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move { agent.run(cancel).await })
    };

    for (user, text) in script {
        channel.inject_event(sample_event(GROUP, *user, text)).await;
    }
    tokio::time::timeout(Duration::from_secs(5), async {
        while channel.sent_count().await < replies {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("replies were not sent in time");

    cancel.cancel();
    runner.await.unwrap().unwrap();
    channel.sent_texts(ChatId(GROUP)).await
}

#[tokio::test]
async fn election_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = quiet_config(StorageConfig {
        database_path: dir.path().join("honorbot.db").display().to_string(),
        wal_mode: true,
    });

    let first = session(&config, &[(1, "/choose")], 1).await;
    assert_eq!(
        first,
        vec!["Почётным участником на 4 часа стал(а): [User1](tg://user?id=1)."]
    );

    let second = session(&config, &[(1, "/choose")], 1).await;
    assert_eq!(second.len(), 1);
    assert!(second[0].starts_with("Почётный участник: [User1](tg://user?id=1).\n"));
    assert!(second[0].contains("не раньше чем через"));
}

#[tokio::test]
async fn participants_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = quiet_config(StorageConfig {
        database_path: dir.path().join("honorbot.db").display().to_string(),
        wal_mode: false,
    });

    session(&config, &[(1, "/members"), (2, "/members")], 2).await;

    let storage = SqliteStorage::new(config.storage.clone());
    let users = storage
        .find_users(&UserFilter::present(ChatId(GROUP)))
        .await
        .unwrap();
    let ids: Vec<i64> = users.iter().map(|u| u.user_id().0).collect();
    assert_eq!(ids, vec![1, 2]);

    let replies = session(&config, &[(3, "/members")], 1).await;
    assert_eq!(
        replies,
        vec![
            "Все участники:\n✅ [User1](tg://user?id=1) — /remove1\n✅ [User2](tg://user?id=2) — /remove2\n✅ [User3](tg://user?id=3) — /remove3"
        ]
    );
}

#[tokio::test]
async fn unknown_collections_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let storage = SqliteStorage::new(StorageConfig {
        database_path: dir.path().join("honorbot.db").display().to_string(),
        wal_mode: true,
    });

    let err = storage.ensure_collection("sessions").await.unwrap_err();
    assert!(matches!(err, HonorError::UnknownCollection { ref name } if name == "sessions"));
    assert_eq!(err.to_string(), "there is no such collection as `sessions`");
}
