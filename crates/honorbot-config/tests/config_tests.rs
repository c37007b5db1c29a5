// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Honorbot configuration system.

use figment::Jail;
use honorbot_config::diagnostic::ConfigError;
use honorbot_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

#[test]
fn full_toml_deserializes() {
    let toml = r#"
[bot]
log_level = "debug"
drain_timeout_secs = 5

[telegram]
bot_token = "123:ABC"
bot_username = "honor_bot"
developer_id = 42

[storage]
database_path = "/tmp/honor.db"
wal_mode = false

[election]
lock_seconds = 60
max_chosen_seconds = 120
reroll_probability = 0.0
rating_increment = 0.5
suspense_min_ms = 0
suspense_max_ms = 0
tip_probability = 1.0
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.bot.log_level, "debug");
    assert_eq!(config.bot.drain_timeout_secs, 5);
    assert_eq!(config.telegram.bot_token.as_deref(), Some("123:ABC"));
    assert_eq!(config.telegram.bot_username.as_deref(), Some("honor_bot"));
    assert_eq!(config.telegram.developer_id, Some(42));
    assert_eq!(config.storage.database_path, "/tmp/honor.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.election.lock_seconds, 60);
    assert_eq!(config.election.max_chosen_seconds, 120);
    assert_eq!(config.election.reroll_probability, 0.0);
    assert_eq!(config.election.rating_increment, 0.5);
    assert_eq!(config.election.tip_probability, 1.0);
}

#[test]
fn empty_toml_yields_defaults() {
    let config = load_and_validate_str("").expect("defaults are valid");
    assert_eq!(config.bot.log_level, "info");
    assert_eq!(config.election.lock_seconds, 14_400);
    assert_eq!(config.election.max_chosen_seconds, 86_400);
    assert!(config.storage.wal_mode);
    assert!(config.telegram.developer_id.is_none());
}

#[test]
fn unknown_key_gets_a_suggestion() {
    let toml = "[election]\nlock_secnds = 10\n";
    let errors = load_and_validate_str(toml).expect_err("unknown key must be rejected");
    assert!(
        errors.iter().any(|e| matches!(
            e,
            ConfigError::UnknownKey { key, suggestion: Some(s), .. }
                if key == "lock_secnds" && s == "lock_seconds"
        )),
        "got: {errors:?}"
    );
}

#[test]
fn unknown_key_points_into_inline_source() {
    let toml = "[telegram]\ndeveloper = 1\n";
    let errors = load_and_validate_str(toml).expect_err("unknown key must be rejected");
    let found = errors.iter().any(|e| match e {
        ConfigError::UnknownKey { key, span, .. } => key == "developer" && span.is_some(),
        _ => false,
    });
    assert!(found, "got: {errors:?}");
}

#[test]
fn unknown_section_is_rejected() {
    let errors = load_and_validate_str("[agent]\nname = \"x\"\n").expect_err("unknown section");
    assert!(!errors.is_empty());
}

#[test]
fn wrong_type_is_reported() {
    let errors =
        load_and_validate_str("[election]\nlock_seconds = \"soon\"\n").expect_err("wrong type");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { .. })),
        "got: {errors:?}"
    );
}

#[test]
fn semantic_errors_surface_after_deserialization() {
    let toml = "[election]\nlock_seconds = -5\nreroll_probability = 2.0\n";
    let errors = load_and_validate_str(toml).expect_err("invalid values");
    assert_eq!(errors.len(), 2);
    assert!(
        errors
            .iter()
            .all(|e| matches!(e, ConfigError::Validation { .. }))
    );
}

#[test]
fn env_overrides_file_values() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "custom.toml",
            "[telegram]\nbot_token = \"from-file\"\n[election]\nlock_seconds = 100\n",
        )?;
        jail.set_env("HONORBOT_TELEGRAM_BOT_TOKEN", "from-env");
        jail.set_env("HONORBOT_ELECTION_MAX_CHOSEN_SECONDS", "7");

        let config = load_and_validate_path(&jail.directory().join("custom.toml"))
            .map_err(|errors| format!("{errors:?}"))?;
        assert_eq!(config.telegram.bot_token.as_deref(), Some("from-env"));
        assert_eq!(config.election.lock_seconds, 100);
        assert_eq!(config.election.max_chosen_seconds, 7);
        Ok(())
    });
}

#[test]
fn env_developer_id_is_parsed_as_integer() {
    Jail::expect_with(|jail| {
        jail.create_file("honor.toml", "")?;
        jail.set_env("HONORBOT_TELEGRAM_DEVELOPER_ID", "777");
        let config = load_and_validate_path(&jail.directory().join("honor.toml"))
            .map_err(|errors| format!("{errors:?}"))?;
        assert_eq!(config.telegram.developer_id, Some(777));
        Ok(())
    });
}
