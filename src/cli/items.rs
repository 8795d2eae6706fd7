// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! List item command arguments.
//!
//! ```text
//! items NAME list
//! items NAME add ITEM [--at INDEX]
//! items NAME remove INDEX
//! items NAME replace INDEX ITEM
//! items NAME move FROM TO
//! ```
//!
//! Indices are zero-based, as printed by `list`.

use clap::{Args, Subcommand};

use super::var::ScopeArg;

/// Arguments for the `items` command.
#[derive(Debug, Clone, Args)]
pub struct ItemsArgs {
    /// Variable name.
    pub name: String,

    /// Scope to edit.
    #[arg(long, value_enum, global = true)]
    pub scope: Option<ScopeArg>,

    /// Item operation.
    #[command(subcommand)]
    pub action: ItemsAction,
}

/// Item operations.
#[derive(Debug, Clone, Subcommand)]
pub enum ItemsAction {
    /// Prints the items with their index.
    List,

    /// Inserts an item, appending by default.
    Add {
        /// Item to insert.
        item: String,

        /// Position to insert at.
        #[arg(long, value_name = "INDEX")]
        at: Option<usize>,
    },

    /// Removes the item at an index.
    Remove {
        /// Index of the item.
        index: usize,
    },

    /// Replaces the item at an index.
    Replace {
        /// Index of the item.
        index: usize,
        /// New item.
        item: String,
    },

    /// Moves an item to another position.
    Move {
        /// Current index.
        from: usize,
        /// Target index.
        to: usize,
    },
}
