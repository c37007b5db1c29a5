// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `/top`: participants ranked by accumulated honor time.

use async_trait::async_trait;
use honorbot_core::{HonorError, InboundEvent, UserFilter};
use honorbot_election::{Case, RankEntry, Ranking, format_elapsed, format_percent, rank};
use rand::Rng;

use super::CommandHandler;
use crate::command::Command;
use crate::context::HandlerContext;
use crate::format::format_record;

const TIP_DELAY_MIN_MS: u64 = 500;
const TIP_DELAY_MAX_MS: u64 = 2000;

pub struct TopHandler;

fn rank_line(position: usize, entry: &RankEntry) -> String {
    let time = format_elapsed(entry.user.chosen_ms, Case::Nominative);
    let time = if time.is_empty() {
        "ещё ни разу не был(а)".to_string()
    } else {
        time
    };
    let ending = if entry.is_locked() {
        format!(" *(+ {})*", format_elapsed(entry.lock_left_ms, Case::Nominative))
    } else if entry.is_accruing() {
        format!(" *[+ {}]*", format_elapsed(entry.accrual_left_ms, Case::Nominative))
    } else {
        String::new()
    };
    format!(
        "`{position}. `{} _({})_ — {time}{ending}",
        format_record(&entry.user),
        format_percent(entry.relative)
    )
}

pub(crate) fn ranking_text(ranking: &Ranking) -> String {
    if ranking.is_empty() {
        return "Пока нет участников.".to_string();
    }
    let lines: Vec<String> = ranking
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| rank_line(i + 1, entry))
        .collect();
    let footer = if ranking.lock_active() {
        String::new()
    } else {
        let new = if ranking.holder_accruing() { " нового" } else { "" };
        format!("\n\n/choose — избрать{new} почётного участника.")
    };
    format!("Рейтинг почётных участников:\n{}{footer}", lines.join("\n"))
}

/// Suggest whichever notification command most of the ranking could use.
pub(crate) fn tip_text(ranking: &Ranking) -> String {
    let total = ranking.entries.len();
    let pinged = ranking
        .entries
        .iter()
        .filter(|e| !e.user.noping && !e.user.blocked)
        .count();
    if pinged * 2 >= total {
        let rest = if pinged == total {
            "."
        } else {
            ", а\n/pingon — вернёт их назад."
        };
        format!("Мешают уведомления?\n/noping — поможет убрать их{rest}")
    } else {
        "Не хватает уведомлений?\n/pingon — вернёт радость в вашу жизнь.".to_string()
    }
}

#[async_trait]
impl CommandHandler for TopHandler {
    async fn execute(
        &self,
        ctx: &HandlerContext,
        event: &InboundEvent,
        _command: &Command,
    ) -> Result<(), HonorError> {
        let chat_id = event.chat_id;
        let chat = ctx.chat_record(chat_id).await?;
        let users = ctx.storage.find_users(&UserFilter::present(chat_id)).await?;
        let ranking = rank(users, &chat, ctx.now_ms());

        ctx.send(chat_id, &ranking_text(&ranking)).await?;

        let tip_probability = ctx.election.tip_probability.clamp(0.0, 1.0);
        if ranking.lock_active() && ctx.random(|rng| rng.gen_bool(tip_probability)) {
            ctx.pause(TIP_DELAY_MIN_MS, TIP_DELAY_MAX_MS).await;
            ctx.send(chat_id, &tip_text(&ranking)).await?;
        }
        Ok(())
    }
}
