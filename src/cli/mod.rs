// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for evedit using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! evedit [global options] <command>
//! show [--source process|user|system] [--json]
//! get NAME [--scope] [--items]
//! set NAME VALUE [--scope]
//! items NAME [--scope] {list|add|remove|replace|move}
//! apply FILE [--scope]
//! broadcast [--direct]
//! version | options | inis
//! ```

pub mod global;
pub mod items;
pub mod var;


use crate::cli::global::GlobalOptions;
use crate::cli::items::ItemsArgs;
use crate::cli::var::{ApplyArgs, BroadcastArgs, GetArgs, SetArgs, ShowArgs};
use clap::{Parser, Subcommand};

/// Environment Variable Editor
///
/// Reads and writes user and system environment variables.
#[derive(Debug, Parser)]
#[command(
    name = "evedit",
    author,
    version,
    about = "Environment Variable Editor",
    long_about = "evedit Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Reads and writes persistent user and system environment\n\
                  variables and tells running programs about the change.\n\n\
                  `evedit items Path add C:\\Tools` appends to a list variable.\n\
                  See `evedit <command> --help` for more information about a command.",
    after_help = "CONFIGURATION:\n\n\
                  evedit reads `evedit.toml` from the current directory if it\n\
                  exists. Additional files can be given with --ini and are loaded\n\
                  after it. EVEDIT_<SECTION>__<KEY> environment variables and --set\n\
                  override both, e.g. EVEDIT_NOTIFY__STRATEGY=off."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the configuration files used.
    Inis,

    /// Lists variables of a scope or of this process.
    Show(ShowArgs),

    /// Prints the persisted value of a variable.
    Get(GetArgs),

    /// Creates or overwrites a variable and broadcasts the change.
    Set(SetArgs),

    /// Edits the items of a list variable.
    Items(ItemsArgs),

    /// Applies a JSON file of variables in one save.
    Apply(ApplyArgs),

    /// Broadcasts an environment change without writing anything.
    Broadcast(BroadcastArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
