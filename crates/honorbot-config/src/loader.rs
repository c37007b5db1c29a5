// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./honorbot.toml` > `~/.config/honorbot/honorbot.toml`
//! > `/etc/honorbot/honorbot.toml`, with environment variable overrides via the
//! `HONORBOT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::HonorConfig;

/// Sections addressable from environment variables.
const ENV_SECTIONS: &[&str] = &["telegram", "storage", "election", "bot"];

pub(crate) const SYSTEM_CONFIG: &str = "/etc/honorbot/honorbot.toml";
pub(crate) const LOCAL_CONFIG: &str = "honorbot.toml";

/// Location of the per-user config file, if the platform has one.
pub(crate) fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("honorbot").join("honorbot.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/honorbot/honorbot.toml`
/// 3. `~/.config/honorbot/honorbot.toml`
/// 4. `./honorbot.toml`
/// 5. `HONORBOT_*` environment variables
pub fn load_config() -> Result<HonorConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no environment).
pub fn load_config_from_str(toml_content: &str) -> Result<HonorConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HonorConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from an explicit file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<HonorConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HonorConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The full layered Figment, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(HonorConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

/// Environment provider mapping `HONORBOT_<SECTION>_<KEY>` to `section.key`.
///
/// Only the leading section name is split off, so keys containing
/// underscores survive intact: `HONORBOT_TELEGRAM_BOT_TOKEN` becomes
/// `telegram.bot_token`.
fn env_provider() -> Env {
    Env::prefixed("HONORBOT_").map(|key| section_key(key.as_str()).into())
}

fn section_key(key: &str) -> String {
    for section in ENV_SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_split_on_section_only() {
        assert_eq!(section_key("telegram_bot_token"), "telegram.bot_token");
        assert_eq!(section_key("election_lock_seconds"), "election.lock_seconds");
        assert_eq!(section_key("bot_log_level"), "bot.log_level");
        assert_eq!(section_key("storage_wal_mode"), "storage.wal_mode");
    }

    #[test]
    fn unknown_section_is_left_alone() {
        assert_eq!(section_key("nonsense_key"), "nonsense_key");
    }

    #[test]
    fn env_overrides_local_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                LOCAL_CONFIG,
                r#"
                [election]
                lock_seconds = 600
                max_chosen_seconds = 7200
                "#,
            )?;
            jail.set_env("HONORBOT_ELECTION_LOCK_SECONDS", "60");
            jail.set_env("HONORBOT_TELEGRAM_BOT_TOKEN", "123:abc");

            let config = load_config()?;
            assert_eq!(config.election.lock_seconds, 60);
            assert_eq!(config.election.max_chosen_seconds, 7200);
            assert_eq!(config.telegram.bot_token.as_deref(), Some("123:abc"));
            Ok(())
        });
    }

    #[test]
    fn explicit_path_skips_hierarchy() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(LOCAL_CONFIG, "[bot]\nlog_level = \"trace\"\n")?;
            jail.create_file("custom.toml", "[bot]\ndrain_timeout_secs = 5\n")?;

            let config = load_config_from_path(Path::new("custom.toml"))?;
            assert_eq!(config.bot.drain_timeout_secs, 5);
            assert_eq!(config.bot.log_level, "info");
            Ok(())
        });
    }
}
