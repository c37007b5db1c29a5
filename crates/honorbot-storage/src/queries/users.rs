// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Queries over the `users` collection.
//!
//! Filters and partial updates are translated to SQL with positional
//! parameters. Updates report document-store style counts: `matched` is the
//! number of rows the filter selected, `modified` only those whose stored
//! values actually changed.

use honorbot_core::records::round_rating;
use honorbot_core::{
    ChatId, HonorError, Profile, UpdateOutcome, UserFilter, UserId, UserRecord, UserUpdate,
};
use rusqlite::types::Value;
use rusqlite::{Row, params, params_from_iter};

use crate::database::{Database, map_tr_err};

const USER_COLUMNS: &str = "chat_id, user_id, is_bot, first_name, last_name, username, \
                            has_left, blocked, noping, rating, chosen_ms";

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<UserRecord> {
    Ok(UserRecord {
        chat_id: ChatId(row.get(0)?),
        profile: Profile {
            id: UserId(row.get(1)?),
            is_bot: row.get(2)?,
            first_name: row.get(3)?,
            last_name: row.get(4)?,
            username: row.get(5)?,
        },
        left: row.get(6)?,
        blocked: row.get(7)?,
        noping: row.get(8)?,
        rating: row.get(9)?,
        chosen_ms: row.get(10)?,
    })
}

fn text(value: &Option<String>) -> Value {
    value.clone().map_or(Value::Null, Value::Text)
}

fn flag(value: bool) -> Value {
    Value::Integer(i64::from(value))
}

/// `WHERE` body and its parameters for a filter.
fn filter_sql(filter: &UserFilter) -> (String, Vec<Value>) {
    let mut clauses = vec!["chat_id = ?".to_string()];
    let mut values = vec![Value::Integer(filter.chat_id.0)];
    if let Some(user_id) = filter.user_id {
        clauses.push("user_id = ?".into());
        values.push(Value::Integer(user_id.0));
    }
    if let Some(left) = filter.left {
        clauses.push("has_left = ?".into());
        values.push(flag(left));
    }
    if let Some(blocked) = filter.blocked {
        clauses.push("blocked = ?".into());
        values.push(flag(blocked));
    }
    (clauses.join(" AND "), values)
}

/// `SET` list plus a predicate that is true only when a row would change.
struct Assignments {
    set: Vec<String>,
    set_values: Vec<Value>,
    differs: Vec<String>,
    differs_values: Vec<Value>,
}

impl Assignments {
    fn from_update(update: &UserUpdate) -> Self {
        let mut this = Self {
            set: Vec::new(),
            set_values: Vec::new(),
            differs: Vec::new(),
            differs_values: Vec::new(),
        };
        if let Some(profile) = &update.profile {
            this.assign("is_bot", flag(profile.is_bot));
            this.assign("first_name", Value::Text(profile.first_name.clone()));
            this.assign("last_name", text(&profile.last_name));
            this.assign("username", text(&profile.username));
        }
        if let Some(left) = update.left {
            this.assign("has_left", flag(left));
        }
        if let Some(blocked) = update.blocked {
            this.assign("blocked", flag(blocked));
        }
        if let Some(noping) = update.noping {
            this.assign("noping", flag(noping));
        }
        if let Some(rating) = update.rating {
            this.assign("rating", Value::Real(round_rating(rating)));
        }
        if let Some(delta) = update.add_chosen_ms {
            this.set.push("chosen_ms = chosen_ms + ?".into());
            this.set_values.push(Value::Integer(delta));
            this.differs.push("? != 0".into());
            this.differs_values.push(Value::Integer(delta));
        }
        this
    }

    fn assign(&mut self, column: &str, value: Value) {
        self.set.push(format!("{column} = ?"));
        self.set_values.push(value.clone());
        self.differs.push(format!("{column} IS NOT ?"));
        self.differs_values.push(value);
    }
}

fn apply_update(
    conn: &mut rusqlite::Connection,
    filter: &UserFilter,
    update: &UserUpdate,
    single: bool,
) -> rusqlite::Result<UpdateOutcome> {
    let (where_sql, where_values) = filter_sql(filter);
    let tx = conn.transaction()?;

    let matched: i64 = tx.query_row(
        &format!("SELECT COUNT(*) FROM users WHERE {where_sql}"),
        params_from_iter(where_values.iter()),
        |row| row.get(0),
    )?;
    let matched = (if single { matched.min(1) } else { matched }) as u64;

    let assignments = Assignments::from_update(update);
    let modified = if matched == 0 || assignments.set.is_empty() {
        0
    } else {
        let target = if single {
            format!(
                "rowid = (SELECT rowid FROM users WHERE {where_sql} ORDER BY rowid LIMIT 1)"
            )
        } else {
            where_sql
        };
        let sql = format!(
            "UPDATE users SET {} WHERE {target} AND ({})",
            assignments.set.join(", "),
            assignments.differs.join(" OR "),
        );
        let values = assignments
            .set_values
            .iter()
            .chain(where_values.iter())
            .chain(assignments.differs_values.iter());
        tx.execute(&sql, params_from_iter(values))? as u64
    };

    tx.commit()?;
    Ok(UpdateOutcome { matched, modified })
}

/// Users matching `filter`, in insertion order.
pub async fn find_users(db: &Database, filter: &UserFilter) -> Result<Vec<UserRecord>, HonorError> {
    let (where_sql, values) = filter_sql(filter);
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {USER_COLUMNS} FROM users WHERE {where_sql} ORDER BY rowid"
            ))?;
            let rows = stmt.query_map(params_from_iter(values.iter()), user_from_row)?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(map_tr_err)
}

/// Insert a new participant. Fails if the (chat, user) pair already exists.
pub async fn insert_user(db: &Database, user: &UserRecord) -> Result<(), HonorError> {
    let user = user.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                &format!(
                    "INSERT INTO users ({USER_COLUMNS}) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
                ),
                params![
                    user.chat_id.0,
                    user.profile.id.0,
                    user.profile.is_bot,
                    user.profile.first_name,
                    user.profile.last_name,
                    user.profile.username,
                    user.left,
                    user.blocked,
                    user.noping,
                    round_rating(user.rating),
                    user.chosen_ms,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Update the first user matching `filter`.
pub async fn update_user(
    db: &Database,
    filter: &UserFilter,
    update: &UserUpdate,
) -> Result<UpdateOutcome, HonorError> {
    let (filter, update) = (*filter, update.clone());
    db.connection()
        .call(move |conn| apply_update(conn, &filter, &update, true))
        .await
        .map_err(map_tr_err)
}

/// Update every user matching `filter`.
pub async fn update_users(
    db: &Database,
    filter: &UserFilter,
    update: &UserUpdate,
) -> Result<UpdateOutcome, HonorError> {
    let (filter, update) = (*filter, update.clone());
    db.connection()
        .call(move |conn| apply_update(conn, &filter, &update, false))
        .await
        .map_err(map_tr_err)
}

/// Re-key every user of `from` to `to`.
///
/// A user already present under `to` keeps that record; the old one stays
/// behind under `from`.
pub async fn migrate_chat(db: &Database, from: ChatId, to: ChatId) -> Result<UpdateOutcome, HonorError> {
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            let matched: i64 = tx.query_row(
                "SELECT COUNT(*) FROM users WHERE chat_id = ?1",
                params![from.0],
                |row| row.get(0),
            )?;
            let modified = if from == to {
                0
            } else {
                tx.execute(
                    "UPDATE OR IGNORE users SET chat_id = ?2 WHERE chat_id = ?1",
                    params![from.0, to.0],
                )?
            };
            tx.commit()?;
            Ok(UpdateOutcome {
                matched: matched as u64,
                modified: modified as u64,
            })
        })
        .await
        .map_err(map_tr_err)
}

/// Add `delta_ms` to one user's accumulated honor time inside an open transaction.
pub(crate) fn credit_in_tx(
    tx: &rusqlite::Transaction<'_>,
    chat_id: ChatId,
    user_id: UserId,
    delta_ms: i64,
) -> rusqlite::Result<usize> {
    tx.execute(
        "UPDATE users SET chosen_ms = chosen_ms + ?3 WHERE chat_id = ?1 AND user_id = ?2",
        params![chat_id.0, user_id.0, delta_ms.max(0)],
    )
}
