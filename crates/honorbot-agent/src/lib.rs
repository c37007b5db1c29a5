// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Agent loop and command processing for Honorbot.
//!
//! The [`AgentLoop`] is the central coordinator that:
//! - Receives events from the channel adapter
//! - Hands them to the [`ConversationQueue`], one worker per busy conversation
//! - Dispatches each event to participant bookkeeping and a command handler
//! - Disconnects the channel, drains busy conversations and closes storage on shutdown

pub mod command;
pub mod context;
pub mod dispatch;
pub mod format;
pub mod handlers;
pub mod membership;
pub mod queue;
pub mod shutdown;

use std::sync::Arc;
use std::time::Duration;

use honorbot_core::{ChannelAdapter, HonorError, StorageAdapter};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

pub use command::{Command, CommandKind, CommandParser};
pub use context::HandlerContext;
pub use dispatch::Dispatcher;
pub use queue::{ConversationQueue, EventHandler};

/// Pause after a failed receive before polling the channel again.
const RECEIVE_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Moves events from the channel into per-conversation queues until shutdown.
pub struct AgentLoop {
    channel: Arc<dyn ChannelAdapter>,
    storage: Arc<dyn StorageAdapter>,
    queue: ConversationQueue,
    drain_timeout: Duration,
}

impl AgentLoop {
    /// Creates the loop around a fully configured handler context.
    pub fn new(ctx: HandlerContext, drain_timeout: Duration) -> Self {
        let channel = ctx.channel.clone();
        let storage = ctx.storage.clone();
        let dispatcher = Arc::new(Dispatcher::new(ctx));

        info!(bot = dispatcher.context().bot.username.as_str(), "agent loop initialized");

        Self {
            channel,
            storage,
            queue: ConversationQueue::new(dispatcher),
            drain_timeout,
        }
    }

    pub fn queue(&self) -> &ConversationQueue {
        &self.queue
    }

    /// Runs until the cancellation token is triggered or the channel closes.
    ///
    /// On exit the channel is disconnected, busy conversations get up to the
    /// drain timeout to finish and the store is closed.
    pub async fn run(&self, cancel: CancellationToken) -> Result<(), HonorError> {
        info!("agent loop running");

        loop {
            tokio::select! {
                received = self.channel.receive() => {
                    match received {
                        Ok(event) => self.queue.enqueue(event),
                        Err(e) if e.is_channel_closed() => {
                            warn!(error = %e, "channel closed, stopping agent loop");
                            break;
                        }
                        Err(e) => {
                            error!(error = %e, "channel receive error");
                            tokio::time::sleep(RECEIVE_RETRY_DELAY).await;
                        }
                    }
                }
                _ = cancel.cancelled() => {
                    info!("shutdown signal received, stopping agent loop");
                    break;
                }
            }
        }

        if let Err(e) = self.channel.disconnect().await {
            warn!(error = %e, "channel disconnect failed");
        }
        shutdown::drain_conversations(&self.queue, self.drain_timeout).await;
        self.storage.close().await?;

        info!("agent loop stopped");
        Ok(())
    }
}
