// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `/choose`: elect the honor participant.
//!
//! The whole election is decided before anything is sent or stored. The
//! double-draw theatre only replays a decision that has already been made.

use async_trait::async_trait;
use honorbot_core::{ChatId, HonorError, InboundEvent, UserFilter, UserId, UserRecord, UserUpdate};
use honorbot_election::{
    Case, Election, ElectionOutcome, format_elapsed, format_percent, run_election,
};
use rand::Rng;
use tracing::{debug, info};

use super::CommandHandler;
use crate::command::Command;
use crate::context::HandlerContext;
use crate::format::format_record;

const WAIT_PHRASES: [&str; 3] = ["Погодите-ка...", "Хотя...", "Минуточку..."];

const CANCEL_PHRASES: [&str; 5] = [
    "Охрана, отмєна!",
    "Галя, отмена!",
    "Нет, я передумал)",
    "Хм... Повезёт в следующий раз)",
    "Эх. Не повезло тебе в этот раз...",
];

const NO_PARTICIPANTS: &str = "Недостаточно участников для участия в выборе \"почётного участника\".";

pub struct ChooseHandler;

fn winner_text(lock_seconds: i64, winner: &UserRecord) -> String {
    format!(
        "Почётным участником на {} стал(а): {}.",
        format_elapsed(lock_seconds * 1000, Case::Accusative),
        format_record(winner)
    )
}

fn locked_text(holder: &str, remaining_ms: i64) -> String {
    let wait = format_elapsed(remaining_ms, Case::Accusative);
    let wait = if wait.is_empty() { "мгновение ока".to_string() } else { wait };
    format!(
        "Почётный участник: {holder}.\nПереизбрать почётного участника можно будет не раньше чем через {wait}."
    )
}

fn consolation_text(relative: f64) -> String {
    format!(
        "А твоя вероятность быть избранным теперь составляет {}.",
        format_percent(relative)
    )
}

impl ChooseHandler {
    async fn report_locked(
        &self,
        ctx: &HandlerContext,
        chat_id: ChatId,
        holder: UserId,
        remaining_ms: i64,
    ) -> Result<(), HonorError> {
        let record = ctx
            .storage
            .find_users(&UserFilter::user(chat_id, holder))
            .await?
            .into_iter()
            .next();
        let name = match record {
            Some(user) => format_record(&user),
            None => format!("[{holder}](tg://user?id={holder})"),
        };
        debug!(chat_id = chat_id.0, holder = holder.0, remaining_ms, "election refused, lock active");
        ctx.send(chat_id, &locked_text(&name, remaining_ms)).await
    }

    /// Announce the first draw, then take it back.
    async fn double_draw(
        &self,
        ctx: &HandlerContext,
        chat_id: ChatId,
        election: &Election,
        provisional: &UserRecord,
    ) -> Result<(), HonorError> {
        ctx.send(chat_id, &winner_text(election.lock_seconds, provisional))
            .await?;
        ctx.suspense().await;

        let wait = ctx.random(|rng| WAIT_PHRASES[rng.gen_range(0..WAIT_PHRASES.len())]);
        ctx.send(chat_id, wait).await?;
        ctx.suspense().await;

        let cancel = ctx.random(|rng| CANCEL_PHRASES[rng.gen_range(0..CANCEL_PHRASES.len())]);
        ctx.send(chat_id, cancel).await?;
        ctx.suspense().await;
        Ok(())
    }

    async fn announce(
        &self,
        ctx: &HandlerContext,
        chat_id: ChatId,
        election: Election,
    ) -> Result<(), HonorError> {
        if let Some(provisional) = &election.provisional {
            self.double_draw(ctx, chat_id, &election, provisional).await?;
        }

        ctx.storage.record_election(&election.commit).await?;
        info!(
            chat_id = chat_id.0,
            winner = election.winner.user_id().0,
            rerolled = election.provisional.is_some(),
            credited = ?election.commit.credit,
            "honor participant elected"
        );
        ctx.send(chat_id, &winner_text(election.lock_seconds, &election.winner))
            .await?;

        if let Some(consolation) = election.consolation {
            ctx.send(chat_id, &consolation_text(consolation.relative)).await?;
            ctx.storage
                .update_user(
                    &UserFilter::user(chat_id, consolation.user_id),
                    &UserUpdate::rating(consolation.rating),
                )
                .await?;
            debug!(
                chat_id = chat_id.0,
                user_id = consolation.user_id.0,
                rating = consolation.rating,
                "requester rating raised"
            );
        }
        Ok(())
    }
}

#[async_trait]
impl CommandHandler for ChooseHandler {
    async fn execute(
        &self,
        ctx: &HandlerContext,
        event: &InboundEvent,
        _command: &Command,
    ) -> Result<(), HonorError> {
        let chat_id = event.chat_id;
        let chat = ctx.chat_record(chat_id).await?;
        let eligible = ctx.storage.find_users(&UserFilter::eligible(chat_id)).await?;
        let now = ctx.now_ms();
        let params = ctx.election_params();

        let outcome =
            ctx.random(|rng| run_election(&chat, &eligible, event.sender.id, now, &params, rng));

        match outcome {
            ElectionOutcome::Locked {
                holder,
                remaining_ms,
            } => self.report_locked(ctx, chat_id, holder, remaining_ms).await,
            ElectionOutcome::NoParticipants => ctx.send(chat_id, NO_PARTICIPANTS).await,
            ElectionOutcome::Elected(election) => self.announce(ctx, chat_id, election).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use honorbot_core::Profile;

    #[test]
    fn winner_text_names_the_term() {
        let winner = UserRecord::new(ChatId(-1), Profile::new(5, "Ann"), false);
        assert_eq!(
            winner_text(14_400, &winner),
            "Почётным участником на 4 часа стал(а): [Ann](tg://user?id=5)."
        );
    }

    #[test]
    fn locked_text_falls_back_for_a_blink() {
        assert_eq!(
            locked_text("Ann", 500),
            "Почётный участник: Ann.\nПереизбрать почётного участника можно будет не раньше чем через мгновение ока."
        );
        assert!(locked_text("Ann", 13_400_000).ends_with("через 3 часа 43 минуты."));
    }

    #[test]
    fn consolation_text_shows_percent() {
        assert_eq!(
            consolation_text(0.375),
            "А твоя вероятность быть избранным теперь составляет 37.5%."
        );
    }
}
