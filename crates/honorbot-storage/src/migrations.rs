// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded database migrations using refinery.
//!
//! SQL files under `migrations/` are compiled into the binary and applied
//! when the database is first opened.

use honorbot_core::HonorError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Apply every pending migration.
///
/// Refinery records applied versions in `refinery_schema_history`, so this
/// is a no-op on an up-to-date database.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), HonorError> {
    let report = embedded::migrations::runner()
        .run(conn)
        .map_err(|e| HonorError::Storage {
            source: Box::new(e),
        })?;
    for migration in report.applied_migrations() {
        tracing::info!(version = migration.version(), name = migration.name(), "migration applied");
    }
    Ok(())
}
