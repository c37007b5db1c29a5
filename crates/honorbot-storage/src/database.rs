// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All statements run on tokio-rusqlite's single background thread, which
//! serializes writes. Do NOT open additional connections for writes.

use std::path::Path;

use honorbot_core::HonorError;
use tracing::{debug, info};

use crate::migrations::run_migrations;

/// Convert a tokio-rusqlite error into [`HonorError::Storage`].
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> HonorError {
    match e {
        tokio_rusqlite::Error::Error(inner) => HonorError::Storage {
            source: Box::new(inner),
        },
        tokio_rusqlite::Error::ConnectionClosed => HonorError::storage("database connection closed"),
        _ => HonorError::storage("database connection failed"),
    }
}

/// An open, migrated database.
pub struct Database {
    conn: tokio_rusqlite::Connection,
    tables: Vec<String>,
}

impl Database {
    /// Open (creating if needed) the database at `path`, apply PRAGMAs and
    /// pending migrations, and capture the list of tables.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, HonorError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| HonorError::Storage {
                source: Box::new(e),
            })?;
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| HonorError::Storage {
                source: Box::new(e),
            })?;

        let tables = conn
            .call(move |conn| -> Result<Vec<String>, HonorError> {
                let storage = |e: rusqlite::Error| HonorError::Storage {
                    source: Box::new(e),
                };
                if wal_mode {
                    conn.execute_batch("PRAGMA journal_mode = WAL;")
                        .map_err(storage)?;
                }
                conn.execute_batch(
                    "PRAGMA synchronous = NORMAL;
                     PRAGMA foreign_keys = ON;
                     PRAGMA busy_timeout = 5000;",
                )
                .map_err(storage)?;

                run_migrations(conn)?;

                let mut stmt = conn
                    .prepare(
                        "SELECT name FROM sqlite_master
                         WHERE type = 'table'
                           AND name NOT LIKE 'sqlite_%'
                           AND name != 'refinery_schema_history'
                         ORDER BY name",
                    )
                    .map_err(storage)?;
                let names = stmt
                    .query_map([], |row| row.get::<_, String>(0))
                    .map_err(storage)?
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(storage)?;
                Ok(names)
            })
            .await
            .map_err(|e| match e {
                tokio_rusqlite::Error::Error(inner) => inner,
                _ => HonorError::storage("database connection failed during setup"),
            })?;

        info!(path, wal_mode, tables = ?tables, "database opened");
        Ok(Self { conn, tables })
    }

    /// The shared connection handle.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Tables present when the database was opened.
    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    pub fn has_table(&self, name: &str) -> bool {
        self.tables.iter().any(|t| t == name)
    }

    /// Flush the WAL into the main database file.
    pub async fn checkpoint(&self) -> Result<(), HonorError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}
