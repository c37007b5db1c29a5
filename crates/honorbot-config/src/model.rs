// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use honorbot_core::records::{DEFAULT_LOCK_SECONDS, DEFAULT_MAX_CHOSEN_SECONDS};
use serde::{Deserialize, Serialize};

/// Top-level Honorbot configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HonorConfig {
    /// Process-level settings.
    #[serde(default)]
    pub bot: BotConfig,

    /// Telegram bot integration settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Election tuning.
    #[serde(default)]
    pub election: ElectionConfig,
}

/// Process-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Seconds to wait for busy conversations on shutdown.
    #[serde(default = "default_drain_timeout_secs")]
    pub drain_timeout_secs: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            drain_timeout_secs: default_drain_timeout_secs(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_drain_timeout_secs() -> u64 {
    30
}

/// Telegram bot integration configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. Required by `honorbot serve`.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Bot username used to match `/command@username`. Resolved via
    /// `getMe` when unset.
    #[serde(default)]
    pub bot_username: Option<String>,

    /// Telegram user id receiving `/dev` relays.
    #[serde(default)]
    pub developer_id: Option<i64>,
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("honorbot").join("honorbot.db"))
        .unwrap_or_else(|| "honorbot.db".into())
        .display()
        .to_string()
}

fn default_wal_mode() -> bool {
    true
}

/// Election tuning.
///
/// `lock_seconds` and `max_chosen_seconds` seed new conversations; a
/// conversation keeps the values it was created with.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ElectionConfig {
    /// Cool-down between elections, in seconds.
    #[serde(default = "default_lock_seconds")]
    pub lock_seconds: i64,

    /// Cap on the time credited for one election span, in seconds.
    #[serde(default = "default_max_chosen_seconds")]
    pub max_chosen_seconds: i64,

    /// Probability of the double-draw re-roll when two or more users are eligible.
    #[serde(default = "default_reroll_probability")]
    pub reroll_probability: f64,

    /// Rating added to a requester who was not elected.
    #[serde(default = "default_rating_increment")]
    pub rating_increment: f64,

    /// Lower bound of the pause between double-draw messages, in milliseconds.
    #[serde(default = "default_suspense_min_ms")]
    pub suspense_min_ms: u64,

    /// Upper bound (exclusive) of the pause between double-draw messages.
    #[serde(default = "default_suspense_max_ms")]
    pub suspense_max_ms: u64,

    /// Probability of suggesting `/noping` or `/pingon` after `/top`.
    #[serde(default = "default_tip_probability")]
    pub tip_probability: f64,
}

impl Default for ElectionConfig {
    fn default() -> Self {
        Self {
            lock_seconds: default_lock_seconds(),
            max_chosen_seconds: default_max_chosen_seconds(),
            reroll_probability: default_reroll_probability(),
            rating_increment: default_rating_increment(),
            suspense_min_ms: default_suspense_min_ms(),
            suspense_max_ms: default_suspense_max_ms(),
            tip_probability: default_tip_probability(),
        }
    }
}

fn default_lock_seconds() -> i64 {
    DEFAULT_LOCK_SECONDS
}

fn default_max_chosen_seconds() -> i64 {
    DEFAULT_MAX_CHOSEN_SECONDS
}

fn default_reroll_probability() -> f64 {
    0.4
}

fn default_rating_increment() -> f64 {
    0.2
}

fn default_suspense_min_ms() -> u64 {
    500
}

fn default_suspense_max_ms() -> u64 {
    3000
}

fn default_tip_probability() -> f64 {
    0.1
}
