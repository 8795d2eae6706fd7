// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Set command implementation for evedit.

use crate::cli::var::SetArgs;
use crate::cmd::context::CommandContext;
use crate::config::Config;
use crate::error::Result;

/// Main handler for set command.
///
/// # Errors
///
/// Returns an error if the variable cannot be written. A failed broadcast is
/// only logged.
pub fn run_set_command(args: &SetArgs, config: &Config) -> Result<()> {
    let ctx = CommandContext::from_config(config, args.scope)?;
    set_variable(&ctx, &args.name, &args.value)
}

/// Writes `name` in the context's scope and broadcasts the change.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn set_variable(ctx: &CommandContext, name: &str, value: &str) -> Result<()> {
    ctx.store().set_and_broadcast(name, value, ctx.notifier())?;
    Ok(())
}
