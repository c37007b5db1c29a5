// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel adapter trait for the chat transport (Telegram).

use async_trait::async_trait;

use crate::error::HonorError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{BotIdentity, ChatId, InboundEvent, MemberStatus, TextFormat, UserId};

/// Adapter for the chat transport.
///
/// Every method is a network call: it may suspend for a long time and may
/// fail. Calls for different conversations are not ordered with respect to
/// each other.
#[async_trait]
pub trait ChannelAdapter: PluginAdapter {
    /// Starts receiving events from the platform.
    async fn connect(&mut self) -> Result<(), HonorError>;

    /// Stops receiving events from the platform.
    ///
    /// Events already buffered are still returned by [`receive`](Self::receive);
    /// after that it fails with [`HonorError::ChannelClosed`].
    async fn disconnect(&self) -> Result<(), HonorError>;

    /// Receives the next inbound event.
    async fn receive(&self) -> Result<InboundEvent, HonorError>;

    /// Sends a text message to a conversation.
    async fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
        format: TextFormat,
    ) -> Result<(), HonorError>;

    /// Looks up a person's current membership status in a conversation.
    async fn member_status(
        &self,
        chat_id: ChatId,
        user_id: UserId,
    ) -> Result<MemberStatus, HonorError>;

    /// Returns the bot's own account.
    async fn identity(&self) -> Result<BotIdentity, HonorError>;
}
