// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `/remove<id>` and `/recover<id>`: administrators exclude participants
//! from elections or restore them.

use async_trait::async_trait;
use honorbot_core::{HonorError, InboundEvent, UserFilter, UserRecord, UserUpdate};
use tracing::info;

use super::CommandHandler;
use crate::command::Command;
use crate::context::HandlerContext;
use crate::format::format_record;

pub struct ModerationHandler {
    block: bool,
}

impl ModerationHandler {
    pub fn remove() -> Self {
        Self { block: true }
    }

    pub fn recover() -> Self {
        Self { block: false }
    }

    fn success_text(&self, user: &UserRecord) -> String {
        if self.block {
            format!(
                "Пользователь {} успешно удалён.\nВосстановить: /recover{}.",
                format_record(user),
                user.user_id()
            )
        } else {
            format!("Пользователь {} успешно восстановлен.", format_record(user))
        }
    }
}

#[async_trait]
impl CommandHandler for ModerationHandler {
    async fn execute(
        &self,
        ctx: &HandlerContext,
        event: &InboundEvent,
        command: &Command,
    ) -> Result<(), HonorError> {
        let Some(target) = command.target() else {
            return Ok(());
        };
        let chat_id = event.chat_id;

        if !ctx.is_admin(chat_id, event.sender.id).await? {
            return ctx.send(chat_id, "Вы не являетесь администратором.").await;
        }

        let filter = UserFilter::user(chat_id, target);
        let outcome = ctx
            .storage
            .update_user(&filter, &UserUpdate::blocked(self.block))
            .await?;
        let user = if outcome.changed() {
            ctx.storage.find_users(&filter).await?.into_iter().next()
        } else {
            None
        };
        let Some(user) = user else {
            return ctx.send(chat_id, "Нет такого пользователя.").await;
        };

        info!(
            chat_id = chat_id.0,
            admin = event.sender.id.0,
            target = target.0,
            blocked = self.block,
            "participant moderated"
        );
        ctx.send(chat_id, &self.success_text(&user)).await
    }
}
