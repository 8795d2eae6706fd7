// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Variable command arguments.
//!
//! ```text
//! show      [--source process|user|system] [--json]
//! get NAME  [--scope user|system] [--items]
//! set NAME VALUE [--scope user|system]
//! apply FILE     [--scope user|system]
//! broadcast [--direct]
//! ```
//!
//! Without `--scope`, `global.scope` from the configuration is used.

use clap::{Args, ValueEnum};
use std::path::PathBuf;

use crate::scope::Scope;

/// Persistence scope selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScopeArg {
    /// Current user.
    User,
    /// Whole machine, writes need elevation.
    #[value(alias = "machine")]
    System,
}

impl From<ScopeArg> for Scope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::User => Self::User,
            ScopeArg::System => Self::System,
        }
    }
}

/// Where `show` reads variables from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Source {
    /// Environment inherited by this process.
    Process,
    /// Persisted user scope.
    User,
    /// Persisted system scope.
    System,
}

/// Arguments for the `show` command.
#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    /// Variables to list, defaults to the configured scope.
    #[arg(long, value_enum)]
    pub source: Option<Source>,

    /// Prints a JSON object instead of NAME=VALUE lines.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `get` command.
#[derive(Debug, Clone, Args)]
pub struct GetArgs {
    /// Variable name, case-insensitive.
    pub name: String,

    /// Scope to read.
    #[arg(long, value_enum)]
    pub scope: Option<ScopeArg>,

    /// Prints list items one per line.
    #[arg(long)]
    pub items: bool,
}

/// Arguments for the `set` command.
#[derive(Debug, Clone, Args)]
pub struct SetArgs {
    /// Variable name.
    pub name: String,

    /// Raw value, `%VAR%` references are stored unexpanded.
    #[arg(allow_hyphen_values = true)]
    pub value: String,

    /// Scope to write.
    #[arg(long, value_enum)]
    pub scope: Option<ScopeArg>,
}

/// Arguments for the `apply` command.
#[derive(Debug, Clone, Args)]
pub struct ApplyArgs {
    /// JSON object mapping names to a string or an array of items.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Scope to write.
    #[arg(long, value_enum)]
    pub scope: Option<ScopeArg>,
}

/// Arguments for the `broadcast` command.
#[derive(Debug, Clone, Args)]
pub struct BroadcastArgs {
    /// Broadcasts from this process, ignoring `notify.strategy`.
    #[arg(long)]
    pub direct: bool,
}
