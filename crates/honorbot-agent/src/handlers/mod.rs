// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command handlers and the table that routes commands to them.
//!
//! Refusals (missing rights, unknown user, locked election) are answered in
//! the chat and return `Ok(())`; only transport and store failures are
//! errors.

mod choose;
mod dev;
mod help;
mod members;
mod moderation;
mod notify;
mod top;

use std::collections::HashMap;

use async_trait::async_trait;
use honorbot_core::{HonorError, InboundEvent};

use crate::command::{Command, CommandKind};
use crate::context::HandlerContext;

pub use choose::ChooseHandler;
pub use dev::DevHandler;
pub use help::HelpHandler;
pub use members::MembersHandler;
pub use moderation::ModerationHandler;
pub use notify::NotifyHandler;
pub use top::TopHandler;

/// Executes one kind of command.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn execute(
        &self,
        ctx: &HandlerContext,
        event: &InboundEvent,
        command: &Command,
    ) -> Result<(), HonorError>;
}

pub type HandlerTable = HashMap<CommandKind, Box<dyn CommandHandler>>;

/// One handler per command kind.
pub fn handler_table() -> HandlerTable {
    let mut table: HandlerTable = HashMap::new();
    table.insert(CommandKind::Members, Box::new(MembersHandler));
    table.insert(CommandKind::Remove, Box::new(ModerationHandler::remove()));
    table.insert(CommandKind::Recover, Box::new(ModerationHandler::recover()));
    table.insert(CommandKind::Choose, Box::new(ChooseHandler));
    table.insert(CommandKind::Top, Box::new(TopHandler));
    table.insert(CommandKind::NoPing, Box::new(NotifyHandler::off()));
    table.insert(CommandKind::PingOn, Box::new(NotifyHandler::on()));
    table.insert(CommandKind::Help, Box::new(HelpHandler));
    table.insert(CommandKind::Dev, Box::new(DevHandler));
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_command_kind_has_a_handler() {
        let table = handler_table();
        for kind in [
            CommandKind::Members,
            CommandKind::Remove,
            CommandKind::Recover,
            CommandKind::Choose,
            CommandKind::Top,
            CommandKind::NoPing,
            CommandKind::PingOn,
            CommandKind::Help,
            CommandKind::Dev,
        ] {
            assert!(table.contains_key(&kind), "no handler for /{kind}");
        }
    }
}
