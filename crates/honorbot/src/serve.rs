// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `honorbot serve` command implementation.
//!
//! Opens the store, connects the Telegram channel, resolves the bot identity
//! and runs the agent loop until SIGINT/SIGTERM.

use std::sync::Arc;
use std::time::Duration;

use honorbot_agent::shutdown;
use honorbot_agent::{AgentLoop, HandlerContext};
use honorbot_config::model::HonorConfig;
use honorbot_core::{
    CHATS_COLLECTION, ChannelAdapter, Clock, HonorError, StorageAdapter, SystemClock,
    USERS_COLLECTION,
};
use honorbot_storage::SqliteStorage;
use honorbot_telegram::TelegramChannel;
use tracing::info;

/// Runs the `honorbot serve` command.
pub async fn run_serve(config: HonorConfig) -> Result<(), HonorError> {
    init_tracing(&config.bot.log_level);

    info!("starting honorbot serve");

    let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
    storage.initialize().await?;
    for collection in [USERS_COLLECTION, CHATS_COLLECTION] {
        storage.ensure_collection(collection).await?;
    }
    info!(path = %config.storage.database_path, "storage initialized");

    let mut telegram = TelegramChannel::new(&config.telegram)?;
    telegram.connect().await?;

    let mut identity = telegram.identity().await?;
    if let Some(username) = &config.telegram.bot_username {
        identity.username = username.clone();
    }
    info!(bot_id = identity.id.0, username = %identity.username, "bot identity resolved");

    let channel: Arc<dyn ChannelAdapter> = Arc::new(telegram);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let ctx = HandlerContext::new(channel, storage, clock, &config, identity);

    let agent = AgentLoop::new(ctx, Duration::from_secs(config.bot.drain_timeout_secs));
    let cancel = shutdown::install_signal_handler();
    agent.run(cancel).await?;

    info!("honorbot serve shutdown complete");
    Ok(())
}

/// Initialize the tracing subscriber; `RUST_LOG` overrides the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("honorbot={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
