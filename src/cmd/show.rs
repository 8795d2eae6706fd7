// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Show command implementation for evedit.

use std::io::Write;

use crate::cli::var::{ShowArgs, Source};
use crate::cmd::context::CommandContext;
use crate::config::Config;
use crate::error::Result;
use crate::scope::Scope;
use crate::snapshot;

/// Main handler for show command.
///
/// # Errors
///
/// Returns an error if the scope cannot be read.
pub fn run_show_command(args: &ShowArgs, config: &Config) -> Result<()> {
    let source = args.source.unwrap_or(match config.global.scope {
        Scope::User => Source::User,
        Scope::System => Source::System,
    });
    let ctx = CommandContext::from_config(config, None)?;
    show_variables(&ctx, source, args.json, &mut std::io::stdout().lock())
}

/// Writes the variables of `source` as `NAME=VALUE` lines or a JSON object.
///
/// # Errors
///
/// Returns an error if the scope cannot be read or `out` cannot be written.
pub fn show_variables(
    ctx: &CommandContext,
    source: Source,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let mut vars: Vec<(String, String)> = match source {
        Source::Process => snapshot::process_snapshot(),
        Source::User => ctx.store_for(Scope::User).snapshot()?.into_iter().collect(),
        Source::System => ctx.store_for(Scope::System).snapshot()?.into_iter().collect(),
    };
    vars.sort_by_cached_key(|(name, _)| name.to_ascii_lowercase());

    if json {
        let object: serde_json::Map<String, serde_json::Value> = vars
            .into_iter()
            .map(|(name, value)| (name, serde_json::Value::String(value)))
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&object)?)?;
    } else {
        for (name, value) in &vars {
            writeln!(out, "{name}={value}")?;
        }
    }
    Ok(())
}
