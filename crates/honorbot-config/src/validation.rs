// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::HonorConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every violation instead of stopping at the first one.
pub fn validate_config(config: &HonorConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    if config.storage.database_path.trim().is_empty() {
        fail("storage.database_path must not be empty".to_string());
    }

    if let Some(token) = &config.telegram.bot_token
        && token.trim().is_empty()
    {
        fail("telegram.bot_token must not be empty when set".to_string());
    }

    if let Some(username) = &config.telegram.bot_username
        && (username.is_empty() || username.starts_with('@'))
    {
        fail(format!(
            "telegram.bot_username `{username}` must be the bare username without `@`"
        ));
    }

    let election = &config.election;
    if election.lock_seconds <= 0 {
        fail(format!(
            "election.lock_seconds must be positive, got {}",
            election.lock_seconds
        ));
    }
    if election.max_chosen_seconds <= 0 {
        fail(format!(
            "election.max_chosen_seconds must be positive, got {}",
            election.max_chosen_seconds
        ));
    }
    for (key, value) in [
        ("reroll_probability", election.reroll_probability),
        ("tip_probability", election.tip_probability),
    ] {
        if !(0.0..=1.0).contains(&value) {
            fail(format!("election.{key} must be within [0, 1], got {value}"));
        }
    }
    if !(election.rating_increment > 0.0) {
        fail(format!(
            "election.rating_increment must be positive, got {}",
            election.rating_increment
        ));
    }
    if election.suspense_min_ms > election.suspense_max_ms {
        fail(format!(
            "election.suspense_min_ms ({}) must not exceed election.suspense_max_ms ({})",
            election.suspense_min_ms, election.suspense_max_ms
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
