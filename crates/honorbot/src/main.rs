// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Honorbot - elects the honor participant of a Telegram group.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod doctor;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use honorbot_config::model::HonorConfig;

/// Honorbot - elects the honor participant of a Telegram group.
#[derive(Parser, Debug)]
#[command(name = "honorbot", version, about, long_about = None)]
struct Cli {
    /// Explicit config file, instead of the XDG hierarchy.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Connect to Telegram and serve chats (default).
    Serve,
    /// Check configuration and storage without connecting to Telegram.
    Doctor,
}

fn load_config(path: Option<&PathBuf>) -> HonorConfig {
    let loaded = match path {
        Some(path) => honorbot_config::load_and_validate_path(path),
        None => honorbot_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            honorbot_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref());

    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve::run_serve(config).await,
        Commands::Doctor => match doctor::run_doctor(&config).await {
            Ok(0) => Ok(()),
            Ok(_) => std::process::exit(2),
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Only jemalloc supports advancing the epoch.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = honorbot_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.bot.log_level, "info");
        assert!(config.telegram.bot_token.is_none());
    }

    #[test]
    fn cli_defaults_to_serve() {
        let cli = Cli::parse_from(["honorbot"]);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn cli_accepts_config_after_subcommand() {
        let cli = Cli::parse_from(["honorbot", "doctor", "--config", "/tmp/h.toml"]);
        assert!(matches!(cli.command, Some(Commands::Doctor)));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/h.toml")));
    }
}
