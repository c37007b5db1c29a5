// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram channel adapter for Honorbot.
//!
//! Implements [`ChannelAdapter`] for the Telegram Bot API via teloxide:
//! long polling for inbound messages, legacy Markdown sends with a
//! plain-text fallback, member status lookups and bot identity.

pub mod handler;
pub mod markdown;

use async_trait::async_trait;
use honorbot_config::model::TelegramConfig;
use honorbot_core::error::HonorError;
use honorbot_core::traits::{ChannelAdapter, PluginAdapter};
use honorbot_core::types::{
    BotIdentity, ChatId, HealthStatus, InboundEvent, MemberStatus, TextFormat, UserId,
};
use teloxide::prelude::*;
use teloxide::types::{ChatMemberStatus, ParseMode, Recipient};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Buffered inbound events between the poller and the agent loop.
const INBOUND_BUFFER: usize = 256;

fn channel_error(action: &str, e: teloxide::RequestError) -> HonorError {
    HonorError::Channel {
        message: format!("failed to {action}: {e}"),
        source: Some(Box::new(e)),
    }
}

/// Telegram rejected the legacy Markdown entities of a message.
fn is_entity_parse_error(e: &teloxide::RequestError) -> bool {
    e.to_string().contains("can't parse entities")
}

/// Telegram channel adapter implementing [`ChannelAdapter`].
pub struct TelegramChannel {
    bot: Bot,
    inbound_rx: tokio::sync::Mutex<mpsc::Receiver<InboundEvent>>,
    /// Dropped on disconnect so `receive` ends once the buffer is drained.
    inbound_tx: tokio::sync::Mutex<Option<mpsc::Sender<InboundEvent>>>,
    polling_handle: Option<tokio::task::JoinHandle<()>>,
}

impl TelegramChannel {
    /// Creates a new Telegram channel adapter.
    ///
    /// Requires `config.bot_token` to be set and non-empty.
    pub fn new(config: &TelegramConfig) -> Result<Self, HonorError> {
        let token = config.bot_token.as_deref().ok_or_else(|| {
            HonorError::Config("telegram.bot_token is required to serve".into())
        })?;

        if token.trim().is_empty() {
            return Err(HonorError::Config("telegram.bot_token cannot be empty".into()));
        }

        let (inbound_tx, inbound_rx) = mpsc::channel(INBOUND_BUFFER);
        Ok(Self {
            bot: Bot::new(token),
            inbound_rx: tokio::sync::Mutex::new(inbound_rx),
            inbound_tx: tokio::sync::Mutex::new(Some(inbound_tx)),
            polling_handle: None,
        })
    }

    /// Returns a reference to the underlying teloxide Bot.
    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    async fn send_with(
        &self,
        chat_id: ChatId,
        text: &str,
        parse_mode: Option<ParseMode>,
    ) -> Result<Message, teloxide::RequestError> {
        let request = self
            .bot
            .send_message(Recipient::Id(teloxide::types::ChatId(chat_id.0)), text);
        match parse_mode {
            Some(mode) => request.parse_mode(mode).await,
            None => request.await,
        }
    }
}

fn member_status(status: ChatMemberStatus) -> MemberStatus {
    match status {
        ChatMemberStatus::Owner => MemberStatus::Creator,
        ChatMemberStatus::Administrator => MemberStatus::Administrator,
        ChatMemberStatus::Member => MemberStatus::Member,
        ChatMemberStatus::Restricted => MemberStatus::Restricted,
        ChatMemberStatus::Left => MemberStatus::Left,
        ChatMemberStatus::Banned => MemberStatus::Banned,
    }
}

#[async_trait]
impl PluginAdapter for TelegramChannel {
    async fn health_check(&self) -> Result<HealthStatus, HonorError> {
        match self.bot.get_me().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!("Telegram bot unreachable: {e}"))),
        }
    }
}

#[async_trait]
impl ChannelAdapter for TelegramChannel {
    async fn connect(&mut self) -> Result<(), HonorError> {
        if self.polling_handle.is_some() {
            return Ok(());
        }

        let bot = self.bot.clone();
        let Some(tx) = self.inbound_tx.lock().await.clone() else {
            return Err(HonorError::ChannelClosed(
                "Telegram channel was disconnected".into(),
            ));
        };

        info!("starting Telegram long polling");

        let handle = tokio::spawn(async move {
            let handler = Update::filter_message().endpoint(move |msg: Message| {
                let tx = tx.clone();
                async move {
                    match handler::to_inbound_event(&msg) {
                        Some(event) => {
                            if tx.send(event).await.is_err() {
                                warn!(chat_id = msg.chat.id.0, "inbound channel closed, dropping message");
                            }
                        }
                        None => debug!(chat_id = msg.chat.id.0, "ignoring message without sender"),
                    }
                    respond(())
                }
            });

            Dispatcher::builder(bot, handler)
                .default_handler(|_| async {})
                .build()
                .dispatch()
                .await;
        });

        self.polling_handle = Some(handle);
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), HonorError> {
        debug!("Telegram channel disconnecting");
        if let Some(handle) = &self.polling_handle {
            handle.abort();
        }
        self.inbound_tx.lock().await.take();
        Ok(())
    }

    async fn receive(&self) -> Result<InboundEvent, HonorError> {
        let mut rx = self.inbound_rx.lock().await;
        rx.recv()
            .await
            .ok_or_else(|| HonorError::ChannelClosed("Telegram inbound stream ended".into()))
    }

    async fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
        format: TextFormat,
    ) -> Result<(), HonorError> {
        let parse_mode = match format {
            TextFormat::Plain => None,
            TextFormat::Markdown => Some(ParseMode::Markdown),
        };
        let formatted = parse_mode.is_some();
        match self.send_with(chat_id, text, parse_mode).await {
            Ok(_) => Ok(()),
            Err(e) if formatted && is_entity_parse_error(&e) => {
                warn!(chat_id = chat_id.0, error = %e, "Markdown rejected, sending as plain text");
                self.send_with(chat_id, &markdown::to_plain_text(text), None)
                    .await
                    .map(|_| ())
                    .map_err(|e| channel_error("send message", e))
            }
            Err(e) => Err(channel_error("send message", e)),
        }
    }

    async fn member_status(
        &self,
        chat_id: ChatId,
        user_id: UserId,
    ) -> Result<MemberStatus, HonorError> {
        let user = u64::try_from(user_id.0).map_err(|_| HonorError::Channel {
            message: format!("invalid Telegram user id {user_id}"),
            source: None,
        })?;
        let member = self
            .bot
            .get_chat_member(
                teloxide::types::ChatId(chat_id.0),
                teloxide::types::UserId(user),
            )
            .await
            .map_err(|e| channel_error("fetch chat member", e))?;
        Ok(member_status(member.kind.status()))
    }

    async fn identity(&self) -> Result<BotIdentity, HonorError> {
        let me = self
            .bot
            .get_me()
            .await
            .map_err(|e| channel_error("fetch bot identity", e))?;
        Ok(BotIdentity {
            id: UserId(me.user.id.0 as i64),
            username: me.username().to_string(),
        })
    }
}
