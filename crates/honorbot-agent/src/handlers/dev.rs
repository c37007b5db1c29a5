// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `/dev <text>`: relay a message to the developer. Private dialogues only.

use async_trait::async_trait;
use honorbot_core::{ChatId, HonorError, InboundEvent};
use tracing::{info, warn};

use super::CommandHandler;
use crate::command::Command;
use crate::context::HandlerContext;
use crate::format::format_user;

const USAGE: &str = "К сожалению, сообщение не может быть пустым. Отправьте команду в виде:\n`/dev и следом текст сообщения`";
const UNAVAILABLE: &str = "К сожалению, сейчас сообщения разработчику не принимаются.";
const DELIVERED: &str = "Спасибо. Сообщение было доставлено разработчику.";

pub struct DevHandler;

#[async_trait]
impl CommandHandler for DevHandler {
    async fn execute(
        &self,
        ctx: &HandlerContext,
        event: &InboundEvent,
        command: &Command,
    ) -> Result<(), HonorError> {
        if !event.is_private() {
            return Ok(());
        }
        let chat_id = event.chat_id;
        let message = command.text().unwrap_or_default();
        if message.is_empty() {
            return ctx.send(chat_id, USAGE).await;
        }

        let Some(developer) = ctx.developer_id else {
            warn!(user_id = event.sender.id.0, "developer message dropped, no developer_id configured");
            return ctx.send(chat_id, UNAVAILABLE).await;
        };

        let developer_chat = ChatId(developer.0);
        ctx.send(developer_chat, &format_user(&event.sender, false)).await?;
        ctx.send_plain(developer_chat, message).await?;
        info!(user_id = event.sender.id.0, "message relayed to developer");
        ctx.send(chat_id, DELIVERED).await
    }
}
