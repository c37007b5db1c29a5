// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock channel adapter for deterministic testing.
//!
//! `MockChannel` implements `ChannelAdapter` with injectable inbound events,
//! captured outbound messages and scripted member statuses.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use honorbot_core::{
    BotIdentity, ChannelAdapter, ChatId, HealthStatus, HonorError, InboundEvent, MemberStatus,
    PluginAdapter, TextFormat, UserId,
};

/// Id of the bot account reported by [`MockChannel::identity`].
pub const MOCK_BOT_ID: i64 = 1_000;

/// Username of the bot account reported by [`MockChannel::identity`].
pub const MOCK_BOT_USERNAME: &str = "honor_bot";

/// One message captured by [`MockChannel::send_text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub chat_id: ChatId,
    pub text: String,
    pub format: TextFormat,
}

/// A mock transport for testing.
///
/// Provides:
/// - **inbound**: events injected via `inject_event()` are returned by `receive()`
/// - **sent**: texts passed to `send_text()` are captured and retrievable via `sent_messages()`
/// - **statuses**: `member_status()` answers from `set_member_status()`, `Member` otherwise
/// - **disconnect**: once called, `receive()` drains the queue and then reports the channel closed
pub struct MockChannel {
    inbound: Arc<Mutex<VecDeque<InboundEvent>>>,
    sent: Arc<Mutex<Vec<SentMessage>>>,
    statuses: Arc<Mutex<HashMap<(ChatId, UserId), MemberStatus>>>,
    notify: Arc<Notify>,
    failing_sends: AtomicUsize,
    disconnected: AtomicBool,
}

impl MockChannel {
    /// Create a new mock channel with empty queues.
    pub fn new() -> Self {
        Self {
            inbound: Arc::new(Mutex::new(VecDeque::new())),
            sent: Arc::new(Mutex::new(Vec::new())),
            statuses: Arc::new(Mutex::new(HashMap::new())),
            notify: Arc::new(Notify::new()),
            failing_sends: AtomicUsize::new(0),
            disconnected: AtomicBool::new(false),
        }
    }

    /// Inject an inbound event into the receive queue.
    pub async fn inject_event(&self, event: InboundEvent) {
        self.inbound.lock().await.push_back(event);
        self.notify.notify_one();
    }

    /// Script the status returned for a person in a conversation.
    pub async fn set_member_status(&self, chat_id: ChatId, user_id: UserId, status: MemberStatus) {
        self.statuses.lock().await.insert((chat_id, user_id), status);
    }

    /// Make the next `count` sends fail with a channel error.
    pub fn fail_next_sends(&self, count: usize) {
        self.failing_sends.store(count, Ordering::SeqCst);
    }

    /// Get all messages that were sent through `send_text()`.
    pub async fn sent_messages(&self) -> Vec<SentMessage> {
        self.sent.lock().await.clone()
    }

    /// Texts sent to one conversation, in order.
    pub async fn sent_texts(&self, chat_id: ChatId) -> Vec<String> {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .map(|m| m.text.clone())
            .collect()
    }

    /// Get the count of sent messages.
    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// Clear all sent messages.
    pub async fn clear_sent(&self) {
        self.sent.lock().await.clear();
    }
}

impl Default for MockChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockChannel {
    async fn health_check(&self) -> Result<HealthStatus, HonorError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ChannelAdapter for MockChannel {
    async fn connect(&mut self) -> Result<(), HonorError> {
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), HonorError> {
        self.disconnected.store(true, Ordering::SeqCst);
        self.notify.notify_one();
        Ok(())
    }

    async fn receive(&self) -> Result<InboundEvent, HonorError> {
        loop {
            {
                let mut queue = self.inbound.lock().await;
                if let Some(event) = queue.pop_front() {
                    return Ok(event);
                }
            }
            if self.disconnected.load(Ordering::SeqCst) {
                return Err(HonorError::ChannelClosed("mock channel disconnected".into()));
            }
            self.notify.notified().await;
        }
    }

    async fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
        format: TextFormat,
    ) -> Result<(), HonorError> {
        let failing = self
            .failing_sends
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(HonorError::channel("mock send failure"));
        }

        self.sent.lock().await.push(SentMessage {
            chat_id,
            text: text.to_string(),
            format,
        });
        Ok(())
    }

    async fn member_status(
        &self,
        chat_id: ChatId,
        user_id: UserId,
    ) -> Result<MemberStatus, HonorError> {
        Ok(self
            .statuses
            .lock()
            .await
            .get(&(chat_id, user_id))
            .copied()
            .unwrap_or(MemberStatus::Member))
    }

    async fn identity(&self) -> Result<BotIdentity, HonorError> {
        Ok(BotIdentity {
            id: UserId(MOCK_BOT_ID),
            username: MOCK_BOT_USERNAME.to_string(),
        })
    }
}
