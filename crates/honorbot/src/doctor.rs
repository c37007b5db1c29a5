// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `honorbot doctor` command implementation.
//!
//! Runs offline diagnostic checks against the configuration and the store.

use std::path::Path;
use std::time::{Duration, Instant};

use honorbot_config::model::HonorConfig;
use honorbot_core::{
    CHATS_COLLECTION, HealthStatus, HonorError, PluginAdapter, StorageAdapter, USERS_COLLECTION,
};
use honorbot_storage::SqliteStorage;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed successfully.
    Pass,
    /// Check passed with a warning.
    Warn,
    /// Check failed.
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>, start: Instant) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            duration: start.elapsed(),
        }
    }
}

/// Run the `honorbot doctor` command.
///
/// Prints every check and returns how many of them failed.
pub async fn run_doctor(config: &HonorConfig) -> Result<usize, HonorError> {
    let results = run_checks(config).await;

    println!();
    println!("  honorbot doctor");
    println!("  {}", "-".repeat(50));
    for result in &results {
        println!("{}", render_line(result));
    }
    println!();

    let fails = results
        .iter()
        .filter(|r| r.status == CheckStatus::Fail)
        .count();
    let warns = results
        .iter()
        .filter(|r| r.status == CheckStatus::Warn)
        .count();
    if fails + warns > 0 {
        let issues = fails + warns;
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }
    println!();

    Ok(fails)
}

pub async fn run_checks(config: &HonorConfig) -> Vec<CheckResult> {
    vec![
        check_telegram(config),
        check_database(config).await,
    ]
}

fn render_line(result: &CheckResult) -> String {
    let tag = match result.status {
        CheckStatus::Pass => "[OK]  ",
        CheckStatus::Warn => "[WARN]",
        CheckStatus::Fail => "[FAIL]",
    };
    format!(
        "    {tag} {:<20} {} ({}ms)",
        result.name,
        result.message,
        result.duration.as_millis()
    )
}

fn check_telegram(config: &HonorConfig) -> CheckResult {
    let start = Instant::now();
    let telegram = &config.telegram;
    if telegram.bot_token.is_none() {
        return CheckResult::new(
            "Telegram",
            CheckStatus::Warn,
            "no bot token configured (serve will refuse to start)",
            start,
        );
    }
    let message = match (&telegram.bot_username, telegram.developer_id) {
        (Some(username), Some(_)) => format!("token set, username @{username}, /dev enabled"),
        (Some(username), None) => format!("token set, username @{username}, /dev disabled"),
        (None, Some(_)) => "token set, username from getMe, /dev enabled".to_string(),
        (None, None) => "token set, username from getMe, /dev disabled".to_string(),
    };
    CheckResult::new("Telegram", CheckStatus::Pass, message, start)
}

/// Opens the store, applies migrations and probes both collections.
async fn check_database(config: &HonorConfig) -> CheckResult {
    let start = Instant::now();
    let path = &config.storage.database_path;

    if !Path::new(path).exists() {
        return CheckResult::new(
            "Database",
            CheckStatus::Warn,
            format!("not found: {path} (will be created on first run)"),
            start,
        );
    }

    let storage = SqliteStorage::new(config.storage.clone());
    if let Err(e) = storage.initialize().await {
        return CheckResult::new("Database", CheckStatus::Fail, format!("open failed: {e}"), start);
    }
    for collection in [USERS_COLLECTION, CHATS_COLLECTION] {
        if let Err(e) = storage.ensure_collection(collection).await {
            return CheckResult::new("Database", CheckStatus::Fail, e.to_string(), start);
        }
    }

    let result = match storage.health_check().await {
        Ok(HealthStatus::Healthy) => {
            CheckResult::new("Database", CheckStatus::Pass, "connected", start)
        }
        Ok(HealthStatus::Degraded(reason)) => {
            CheckResult::new("Database", CheckStatus::Warn, reason, start)
        }
        Ok(HealthStatus::Unhealthy(reason)) => {
            CheckResult::new("Database", CheckStatus::Fail, reason, start)
        }
        Err(e) => CheckResult::new("Database", CheckStatus::Fail, e.to_string(), start),
    };
    with_checkpoint(result, storage.close().await)
}

/// Fold the closing WAL checkpoint into the database check; a failed
/// checkpoint downgrades a pass to a warning.
fn with_checkpoint(mut result: CheckResult, closed: Result<(), HonorError>) -> CheckResult {
    if let Err(e) = closed
        && result.status == CheckStatus::Pass
    {
        result.status = CheckStatus::Warn;
        result.message = format!("{}, but checkpoint on close failed: {e}", result.message);
    }
    result
}
