// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Apply command implementation for evedit.
//!
//! ```json
//! { "JAVA_HOME": "C:\\Java", "Path": ["C:\\Java\\bin", "%SystemRoot%"] }
//! ```
//!
//! Arrays are encoded as list values. Every value is encoded before anything
//! is written, then the whole file is saved in one commit.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use anyhow::Context;

use crate::cli::var::ApplyArgs;
use crate::cmd::context::CommandContext;
use crate::cmd::report::{ensure_saved, write_report};
use crate::codec::{self, VariableValue};
use crate::config::Config;
use crate::editor::EditSession;
use crate::error::Result;

/// Main handler for apply command.
///
/// # Errors
///
/// Returns an error if the file is invalid or any variable fails to save.
pub fn run_apply_command(args: &ApplyArgs, config: &Config) -> Result<()> {
    let ctx = CommandContext::from_config(config, args.scope)?;
    apply_file(&ctx, &args.file, &mut std::io::stdout().lock())
}

/// Reads a JSON variable file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not an object of
/// strings and string arrays.
pub fn read_variables(path: &Path) -> Result<BTreeMap<String, VariableValue>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

/// Applies every variable of `path` through one edit session.
///
/// # Errors
///
/// Returns an error if the file is invalid, a value cannot be encoded, the
/// scope cannot be read, or any variable fails to save.
pub fn apply_file(ctx: &CommandContext, path: &Path, out: &mut dyn Write) -> Result<()> {
    let vars = read_variables(path)?;

    let mut encoded = Vec::with_capacity(vars.len());
    for (name, value) in &vars {
        let raw = codec::encode(value).with_context(|| format!("cannot encode '{name}'"))?;
        encoded.push((name, raw));
    }

    let store = ctx.store();
    let mut session = EditSession::from_store(&store)?;
    for (name, raw) in &encoded {
        session.upsert(name, raw);
    }

    let report = session.commit(&store, ctx.notifier(), ctx.policy());
    write_report(&report, out)?;
    ensure_saved(&report)
}
