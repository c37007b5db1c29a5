// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Graceful shutdown coordination with signal handling.
//!
//! Installs handlers for SIGTERM and SIGINT (Ctrl+C), triggering a
//! [`CancellationToken`] that the agent loop monitors. Busy conversations
//! are drained before the process exits.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::queue::ConversationQueue;

/// Installs signal handlers for SIGTERM and SIGINT.
///
/// Returns a [`CancellationToken`] that is cancelled when either signal is received.
pub fn install_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};
            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    tokio::select! {
                        _ = ctrl_c => {
                            info!("received SIGINT (Ctrl+C), initiating shutdown");
                        }
                        _ = sigterm.recv() => {
                            info!("received SIGTERM, initiating shutdown");
                        }
                    }
                }
                Err(e) => {
                    warn!(error = %e, "failed to install SIGTERM handler, listening for Ctrl+C only");
                    let _ = ctrl_c.await;
                    info!("received SIGINT (Ctrl+C), initiating shutdown");
                }
            }
        }

        #[cfg(not(unix))]
        {
            let _ = ctrl_c.await;
            info!("received Ctrl+C, initiating shutdown");
        }

        token_clone.cancel();
        debug!("shutdown signal handler completed");
    });

    token
}

/// Waits up to `timeout` for every conversation to finish its queued events.
pub async fn drain_conversations(queue: &ConversationQueue, timeout: Duration) {
    let busy = queue.busy_count();
    if busy == 0 {
        info!("no busy conversations to drain");
        return;
    }

    info!(count = busy, "waiting for busy conversations to finish");
    if queue.wait_idle(timeout).await {
        info!("all conversations drained");
    } else {
        warn!(
            remaining = queue.busy_count(),
            "drain timeout reached, abandoning queued events"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use honorbot_core::{ChatId, ChatKind, HonorError, InboundEvent, Profile};

    use crate::queue::EventHandler;

    struct Sleepy(Duration);

    #[async_trait]
    impl EventHandler for Sleepy {
        async fn handle(&self, _event: InboundEvent) -> Result<(), HonorError> {
            tokio::time::sleep(self.0).await;
            Ok(())
        }
    }

    fn event() -> InboundEvent {
        InboundEvent::text(ChatId(-1), ChatKind::Group, Profile::new(1, "Ann"), "/top")
    }

    #[tokio::test]
    async fn install_signal_handler_returns_token() {
        let token = install_signal_handler();
        assert!(!token.is_cancelled());
        token.cancel();
    }

    #[tokio::test]
    async fn drain_idle_queue_returns_immediately() {
        let queue = ConversationQueue::new(Arc::new(Sleepy(Duration::ZERO)));
        drain_conversations(&queue, Duration::from_millis(10)).await;
    }

    #[tokio::test]
    async fn drain_waits_for_busy_conversations() {
        let queue = ConversationQueue::new(Arc::new(Sleepy(Duration::from_millis(20))));
        queue.enqueue(event());
        drain_conversations(&queue, Duration::from_secs(5)).await;
        assert_eq!(queue.busy_count(), 0);
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn drain_gives_up_after_timeout() {
        let queue = ConversationQueue::new(Arc::new(Sleepy(Duration::from_secs(60))));
        queue.enqueue(event());
        drain_conversations(&queue, Duration::from_millis(20)).await;
        assert_eq!(queue.busy_count(), 1);
        assert!(logs_contain("drain timeout reached"));
    }
}
