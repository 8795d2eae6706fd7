// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Get command implementation for evedit.

use std::io::Write;

use crate::cli::var::GetArgs;
use crate::cmd::context::CommandContext;
use crate::codec::{self, VariableValue};
use crate::config::Config;
use crate::error::Result;

/// Main handler for get command.
///
/// # Errors
///
/// Returns an error if the scope cannot be read.
pub fn run_get_command(args: &GetArgs, config: &Config) -> Result<()> {
    let ctx = CommandContext::from_config(config, args.scope)?;
    get_variable(&ctx, &args.name, args.items, &mut std::io::stdout().lock())
}

/// Writes the raw value of `name`, or its items one per line.
///
/// An absent variable prints an empty line, or nothing with `items`.
///
/// # Errors
///
/// Returns an error if the scope cannot be read or `out` cannot be written.
pub fn get_variable(
    ctx: &CommandContext,
    name: &str,
    items: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let raw = ctx.store().get(name)?;
    if !items {
        writeln!(out, "{raw}")?;
        return Ok(());
    }
    match codec::decode(&raw) {
        VariableValue::Scalar(value) if value.is_empty() => {}
        value => {
            for item in value.items() {
                writeln!(out, "{item}")?;
            }
        }
    }
    Ok(())
}
