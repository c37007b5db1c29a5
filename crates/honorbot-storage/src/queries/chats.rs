// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Queries over the `chats` collection.

use honorbot_core::{ChatId, ChatRecord, Chosen, ElectionCommit, HonorError, UserId};
use rusqlite::{OptionalExtension, params};
use tracing::debug;

use crate::database::{Database, map_tr_err};
use crate::queries::users::credit_in_tx;

/// Election state of one conversation, if it has ever held an election.
pub async fn find_chat(db: &Database, chat_id: ChatId) -> Result<Option<ChatRecord>, HonorError> {
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT chat_id, lock_seconds, max_chosen_seconds,
                        chosen_user_id, chosen_at_ms, chosen_lock_seconds
                 FROM chats WHERE chat_id = ?1",
                params![chat_id.0],
                |row| {
                    let chosen_user: Option<i64> = row.get(3)?;
                    let chosen_at: Option<i64> = row.get(4)?;
                    let chosen_lock: Option<i64> = row.get(5)?;
                    let lock_seconds: i64 = row.get(1)?;
                    Ok(ChatRecord {
                        chat_id: ChatId(row.get(0)?),
                        chosen: chosen_user.zip(chosen_at).map(|(user, at)| Chosen {
                            user_id: UserId(user),
                            at_ms: at,
                            lock_seconds: chosen_lock.unwrap_or(lock_seconds),
                        }),
                        lock_seconds,
                        max_chosen_seconds: row.get(2)?,
                    })
                },
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// Persist a new election.
///
/// The previous holder's credit and the chat's new `chosen` are written in
/// one transaction: either both land or neither does.
pub async fn record_election(db: &Database, commit: &ElectionCommit) -> Result<(), HonorError> {
    let commit = commit.clone();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            let chat = &commit.chat;

            if let Some((user_id, delta_ms)) = commit.credit {
                let credited = credit_in_tx(&tx, chat.chat_id, user_id, delta_ms)?;
                if credited == 0 {
                    debug!(chat_id = %chat.chat_id, user_id = %user_id, "previous holder has no record to credit");
                }
            }

            let chosen = chat.chosen;
            tx.execute(
                "INSERT INTO chats (chat_id, lock_seconds, max_chosen_seconds,
                                    chosen_user_id, chosen_at_ms, chosen_lock_seconds)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(chat_id) DO UPDATE SET
                     chosen_user_id = excluded.chosen_user_id,
                     chosen_at_ms = excluded.chosen_at_ms,
                     chosen_lock_seconds = excluded.chosen_lock_seconds",
                params![
                    chat.chat_id.0,
                    chat.lock_seconds,
                    chat.max_chosen_seconds,
                    chosen.map(|c| c.user_id.0),
                    chosen.map(|c| c.at_ms),
                    chosen.map(|c| c.lock_seconds),
                ],
            )?;
            tx.commit()
        })
        .await
        .map_err(map_tr_err)
}
