// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `/noping` and `/pingon`: whether the caller is mentioned in bot messages.

use async_trait::async_trait;
use honorbot_core::{HonorError, InboundEvent, UserFilter, UserUpdate};

use super::CommandHandler;
use crate::command::Command;
use crate::context::HandlerContext;
use crate::format::format_user;

pub struct NotifyHandler {
    noping: bool,
}

impl NotifyHandler {
    pub fn off() -> Self {
        Self { noping: true }
    }

    pub fn on() -> Self {
        Self { noping: false }
    }
}

/// Reply to a notification toggle. `name` is already rendered according to
/// the caller's new setting.
fn reply(noping: bool, changed: bool, name: &str) -> String {
    match (noping, changed) {
        (true, true) => format!("{name}, прошу прощения. Зря быканул."),
        (true, false) => format!("{name}, для тебя ведь уведомления и так уже выключены..."),
        (false, true) => format!("{name}, уведомления включены назад."),
        (false, false) => format!("{name}, но ведь для тебя уведомления и так включены..."),
    }
}

#[async_trait]
impl CommandHandler for NotifyHandler {
    async fn execute(
        &self,
        ctx: &HandlerContext,
        event: &InboundEvent,
        _command: &Command,
    ) -> Result<(), HonorError> {
        let outcome = ctx
            .storage
            .update_user(
                &UserFilter::user(event.chat_id, event.sender.id),
                &UserUpdate::noping(self.noping),
            )
            .await?;
        let name = format_user(&event.sender, self.noping);
        ctx.send(event.chat_id, &reply(self.noping, outcome.changed(), &name))
            .await
    }
}
