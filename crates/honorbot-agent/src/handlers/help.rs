// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `/help`.

use async_trait::async_trait;
use honorbot_config::model::ElectionConfig;
use honorbot_core::{HonorError, InboundEvent};
use honorbot_election::{Case, format_elapsed};

use super::CommandHandler;
use crate::command::Command;
use crate::context::HandlerContext;

pub struct HelpHandler;

/// Help text quoting the configured election windows.
pub(crate) fn help_text(election: &ElectionConfig) -> String {
    let term = format_elapsed(election.max_chosen_seconds * 1000, Case::Accusative);
    let lock = format_elapsed(election.lock_seconds * 1000, Case::Accusative);
    format!(
        "Некоторая помощь в использовании бота:\n\
         \n\
         ✓ /choose — избрать почётного участника среди всех участвующих.\n\
         Участники регистрируются автоматически.\n\
         За один раз \"почётный участник\" избирается не более чем на {term} и не может быть переизбран раньше чем через {lock}.\n\
         \n\
         ✓ /top — просмотр списка \"самых почётных\" участников, а также их вероятностей.\n\
         \n\
         ✓ /members — просмотр списка всех участников. Символом «✅» помечены те, кто участвует в выборе почётного участника, «❌» — нет.\n\
         С помощью команд `/remove<id>` и `/recover<id>` можно управлять участниками, которые участвуют в выборе.\n\
         \n\
         Бот иногда отвечает сообщениями с упоминанием участников. Упоминания можно отключить индивидуально в частном порядке.\n\
         ✓ /noping — если вдруг надоели уведомления.\n\
         ✓ /pingon — если хотите включить уведомления назад.\n\
         \n\
         Ваши пожелания и предложения можно писать боту лично. Приятного использования!"
    )
}

#[async_trait]
impl CommandHandler for HelpHandler {
    async fn execute(
        &self,
        ctx: &HandlerContext,
        event: &InboundEvent,
        _command: &Command,
    ) -> Result<(), HonorError> {
        ctx.send(event.chat_id, &help_text(&ctx.election)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_windows_are_quoted() {
        let text = help_text(&ElectionConfig::default());
        assert!(text.contains("не более чем на 1 день и не может быть переизбран раньше чем через 4 часа."));
        assert!(text.starts_with("Некоторая помощь"));
        assert!(text.contains("\n\n✓ /top"));
    }
}
