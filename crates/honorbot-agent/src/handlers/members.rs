// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `/members`: everyone still in the conversation, with the command that
//! excludes or restores them.

use async_trait::async_trait;
use honorbot_core::{HonorError, InboundEvent, UserFilter, UserRecord};

use super::CommandHandler;
use crate::command::Command;
use crate::context::HandlerContext;
use crate::format::format_record;

pub struct MembersHandler;

fn member_line(user: &UserRecord) -> String {
    let (sign, command) = if user.blocked {
        ("❌", "recover")
    } else {
        ("✅", "remove")
    };
    format!("{sign} {} — /{command}{}", format_record(user), user.user_id())
}

/// Eligible participants first, storage order otherwise.
pub(crate) fn members_text(mut users: Vec<UserRecord>) -> String {
    if users.is_empty() {
        return "Нет участников.".to_string();
    }
    users.sort_by_key(|u| u.blocked);
    let lines: Vec<String> = users.iter().map(member_line).collect();
    format!("Все участники:\n{}", lines.join("\n"))
}

#[async_trait]
impl CommandHandler for MembersHandler {
    async fn execute(
        &self,
        ctx: &HandlerContext,
        event: &InboundEvent,
        _command: &Command,
    ) -> Result<(), HonorError> {
        let users = ctx.storage.find_users(&UserFilter::present(event.chat_id)).await?;
        ctx.send(event.chat_id, &members_text(users)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use honorbot_core::{ChatId, Profile};

    fn user(id: i64, name: &str, blocked: bool) -> UserRecord {
        let mut user = UserRecord::new(ChatId(-1), Profile::new(id, name), false);
        user.blocked = blocked;
        user
    }

    #[test]
    fn empty_list() {
        assert_eq!(members_text(Vec::new()), "Нет участников.");
    }

    #[test]
    fn eligible_members_come_first() {
        let text = members_text(vec![
            user(1, "Ann", true),
            user(2, "Bob", false),
            user(3, "Cid", false),
        ]);
        assert_eq!(
            text,
            "Все участники:\n\
             ✅ [Bob](tg://user?id=2) — /remove2\n\
             ✅ [Cid](tg://user?id=3) — /remove3\n\
             ❌ Ann — /recover1"
        );
    }
}
