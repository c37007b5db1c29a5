// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Routing of one inbound event.
//!
//! One-to-one dialogues only serve `/help` and `/dev`; anything else there
//! gets a hint and no further processing. Group events always go through
//! participant bookkeeping before the command, if any, is executed.

use async_trait::async_trait;
use honorbot_core::{HonorError, InboundEvent};
use tracing::{debug, info};

use crate::command::{Command, CommandParser};
use crate::context::HandlerContext;
use crate::handlers::{HandlerTable, handler_table};
use crate::membership;
use crate::queue::EventHandler;

const PRIVATE_HINT: &str = "В личной переписке можно получить только помощь в использовании бота: /help, а также оставить сообщение для разработчика: `/dev <сообщение>`.\nЕго полный функционал раскрывается лишь в групповом чате.";

/// Handles events pulled from a conversation queue.
pub struct Dispatcher {
    ctx: HandlerContext,
    parser: CommandParser,
    handlers: HandlerTable,
}

impl Dispatcher {
    pub fn new(ctx: HandlerContext) -> Self {
        let parser = CommandParser::new(ctx.bot.username.clone());
        Self {
            ctx,
            parser,
            handlers: handler_table(),
        }
    }

    pub fn context(&self) -> &HandlerContext {
        &self.ctx
    }

    fn parse(&self, event: &InboundEvent) -> Option<Command> {
        event.text.as_deref().and_then(|text| self.parser.parse(text))
    }
}

#[async_trait]
impl EventHandler for Dispatcher {
    async fn handle(&self, event: InboundEvent) -> Result<(), HonorError> {
        let command = self.parse(&event);
        let private = event.is_private();

        if private && !command.as_ref().is_some_and(|c| c.kind().allowed_in_private()) {
            debug!(chat_id = event.chat_id.0, "private message outside help and dev");
            return self.ctx.send(event.chat_id, PRIVATE_HINT).await;
        }

        membership::migrate(&self.ctx, &event).await?;
        membership::record_members(&self.ctx, &event).await?;

        let Some(command) = command else {
            return Ok(());
        };
        let kind = command.kind();
        if !private && !kind.allowed_in_group() {
            debug!(chat_id = event.chat_id.0, command = %kind, "command ignored in group");
            return Ok(());
        }
        let Some(handler) = self.handlers.get(&kind) else {
            return Ok(());
        };

        info!(
            chat_id = event.chat_id.0,
            user_id = event.sender.id.0,
            command = %kind,
            "handling command"
        );
        handler.execute(&self.ctx, &event, &command).await
    }
}
