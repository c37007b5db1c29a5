// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Everything a command handler needs: the two adapters, the clock, the
//! random source and the election settings.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use honorbot_config::model::{ElectionConfig, HonorConfig};
use honorbot_core::{
    BotIdentity, ChannelAdapter, ChatId, ChatRecord, Clock, HonorError, StorageAdapter,
    TextFormat, UserId,
};
use honorbot_election::ElectionParams;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Shared state handed to every command handler.
pub struct HandlerContext {
    pub channel: Arc<dyn ChannelAdapter>,
    pub storage: Arc<dyn StorageAdapter>,
    pub clock: Arc<dyn Clock>,
    pub election: ElectionConfig,
    /// Recipient of `/dev` relays.
    pub developer_id: Option<UserId>,
    pub bot: BotIdentity,
    rng: Mutex<StdRng>,
}

impl HandlerContext {
    pub fn new(
        channel: Arc<dyn ChannelAdapter>,
        storage: Arc<dyn StorageAdapter>,
        clock: Arc<dyn Clock>,
        config: &HonorConfig,
        bot: BotIdentity,
    ) -> Self {
        Self {
            channel,
            storage,
            clock,
            election: config.election.clone(),
            developer_id: config.telegram.developer_id.map(UserId),
            bot,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Replace the random source, e.g. with a seeded one.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    /// Run `f` with exclusive access to the random source.
    pub fn random<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut rng)
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    pub fn election_params(&self) -> ElectionParams {
        ElectionParams {
            reroll_probability: self.election.reroll_probability,
            rating_increment: self.election.rating_increment,
        }
    }

    /// Send legacy Markdown.
    pub async fn send(&self, chat_id: ChatId, text: &str) -> Result<(), HonorError> {
        self.channel.send_text(chat_id, text, TextFormat::Markdown).await?;
        debug!(chat_id = chat_id.0, "message sent");
        Ok(())
    }

    /// Send text verbatim.
    pub async fn send_plain(&self, chat_id: ChatId, text: &str) -> Result<(), HonorError> {
        self.channel.send_text(chat_id, text, TextFormat::Plain).await?;
        debug!(chat_id = chat_id.0, "plain message sent");
        Ok(())
    }

    /// Sleep for a random duration in `[min_ms, max_ms)`.
    pub async fn pause(&self, min_ms: u64, max_ms: u64) {
        let ms = if min_ms < max_ms {
            self.random(|rng| rng.gen_range(min_ms..max_ms))
        } else {
            min_ms
        };
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }

    /// Pause between the messages of the double-draw.
    pub async fn suspense(&self) {
        self.pause(self.election.suspense_min_ms, self.election.suspense_max_ms)
            .await;
    }

    /// Stored state of a conversation, or the defaults for one that has
    /// never held an election.
    pub async fn chat_record(&self, chat_id: ChatId) -> Result<ChatRecord, HonorError> {
        Ok(self.storage.find_chat(chat_id).await?.unwrap_or_else(|| {
            ChatRecord::fresh(
                chat_id,
                self.election.lock_seconds,
                self.election.max_chosen_seconds,
            )
        }))
    }

    /// Creators and administrators may moderate; checked on every call.
    pub async fn is_admin(&self, chat_id: ChatId, user_id: UserId) -> Result<bool, HonorError> {
        Ok(self.channel.member_status(chat_id, user_id).await?.is_admin())
    }
}
