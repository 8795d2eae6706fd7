// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Show | Get | Set | Items | Apply | Broadcast | Config
//! ```

use std::process::ExitCode;

use evedit::cli::global::GlobalOptions;
use evedit::cli::{self, Command};
use evedit::cmd::apply::run_apply_command;
use evedit::cmd::broadcast::run_broadcast_command;
use evedit::cmd::config::{run_inis_command, run_options_command};
use evedit::cmd::get::run_get_command;
use evedit::cmd::items::run_items_command;
use evedit::cmd::set::run_set_command;
use evedit::cmd::show::run_show_command;
use evedit::config::Config;
use evedit::config::loader::ConfigLoader;
use evedit::logging::init_logging;
use evedit::logging::{LogConfig, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const CONFIG_FILE: &str = "evedit.toml";
const ENV_PREFIX: &str = "EVEDIT";

fn main() -> ExitCode {
    let cli = cli::parse();

    let config = load_config(&cli.global);
    let log_config = build_log_config(&cli.global, config.as_ref().ok());
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, config)
}

/// Prefers the loaded configuration, which already carries the CLI flags.
fn build_log_config(global: &GlobalOptions, config: Option<&Config>) -> LogConfig {
    if let Some(config) = config {
        return LogConfig::builder()
            .with_console_level(config.global.output_log_level)
            .with_file_level(config.global.file_log_level)
            .maybe_with_log_file(
                config
                    .global
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string()),
            )
            .with_show_timestamps(config.global.log_timestamps)
            .build();
    }

    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}

fn dispatch_command(cli: &cli::Cli, config: evedit::error::Result<Config>) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => config.map(|config| run_options_command(&config)),
        Some(Command::Inis) => build_config_loader(&cli.global)
            .map(|loader| run_inis_command(&loader.format_loaded_files())),
        Some(Command::Show(args)) => config.and_then(|config| run_show_command(args, &config)),
        Some(Command::Get(args)) => config.and_then(|config| run_get_command(args, &config)),
        Some(Command::Set(args)) => config.and_then(|config| run_set_command(args, &config)),
        Some(Command::Items(args)) => {
            config.and_then(|config| run_items_command(args, &config))
        }
        Some(Command::Apply(args)) => {
            config.and_then(|config| run_apply_command(args, &config))
        }
        Some(Command::Broadcast(args)) => {
            config.and_then(|config| run_broadcast_command(args, &config))
        }
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> evedit::error::Result<ConfigLoader> {
    let mut loader = ConfigLoader::new().add_toml_file_optional(CONFIG_FILE);
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader
        .with_env_prefix(ENV_PREFIX)
        .with_overrides(global.to_config_overrides().as_slice())
}

fn load_config(global: &GlobalOptions) -> evedit::error::Result<Config> {
    build_config_loader(global)?.build()
}
