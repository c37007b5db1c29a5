// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for Honorbot.
//!
//! TOML configuration with strict key checking (`deny_unknown_fields`), an
//! XDG file hierarchy, `HONORBOT_*` environment overrides, and miette
//! diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use honorbot_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("lock: {}s", config.election.lock_seconds);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{BotConfig, ElectionConfig, HonorConfig, StorageConfig, TelegramConfig};

/// Load configuration from the XDG hierarchy and validate it.
///
/// Deserialization failures are converted to diagnostics pointing into the
/// file that caused them; a config that deserializes is then checked by
/// [`validation::validate_config`].
pub fn load_and_validate() -> Result<HonorConfig, Vec<ConfigError>> {
    finish(loader::load_config(), collect_toml_sources)
}

/// Load and validate a TOML string with no file or environment layers.
pub fn load_and_validate_str(toml_content: &str) -> Result<HonorConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

/// Load and validate an explicit config file (plus environment overrides).
pub fn load_and_validate_path(path: &Path) -> Result<HonorConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path), || {
        std::fs::read_to_string(path)
            .map(|content| vec![(path.display().to_string(), content)])
            .unwrap_or_default()
    })
}

fn finish(
    loaded: Result<HonorConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<HonorConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

/// Read whichever hierarchy files exist, for source span resolution.
fn collect_toml_sources() -> Vec<(String, String)> {
    let local = std::env::current_dir()
        .map(|d| d.join(loader::LOCAL_CONFIG))
        .unwrap_or_else(|_| loader::LOCAL_CONFIG.into());

    [
        Some(local),
        loader::user_config_path(),
        Some(loader::SYSTEM_CONFIG.into()),
    ]
    .into_iter()
    .flatten()
    .filter_map(|path| {
        std::fs::read_to_string(&path)
            .ok()
            .map(|content| (path.display().to_string(), content))
    })
    .collect()
}
