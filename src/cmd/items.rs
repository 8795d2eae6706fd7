// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Items command implementation for evedit.
//!
//! ```text
//! store.get(NAME) --> EditSession [NAME] --> ListEditor --> confirm
//!                                        --> commit(store, notifier, policy)
//! ```
//!
//! A non-empty scalar is edited as a one-item list. An absent variable only
//! accepts `add`.

use std::io::Write;

use anyhow::anyhow;

use crate::cli::items::{ItemsAction, ItemsArgs};
use crate::cmd::context::CommandContext;
use crate::cmd::report::{ensure_saved, write_report};
use crate::codec;
use crate::config::Config;
use crate::editor::{EditSession, ListEditor};
use crate::error::{EditError, Result};

/// Main handler for items command.
///
/// # Errors
///
/// Returns an error if the variable cannot be read, the edit is rejected, or
/// the save fails.
pub fn run_items_command(args: &ItemsArgs, config: &Config) -> Result<()> {
    let ctx = CommandContext::from_config(config, args.scope)?;
    edit_items(&ctx, &args.name, &args.action, &mut std::io::stdout().lock())
}

/// Applies one item operation to `name` and saves it.
///
/// # Errors
///
/// Returns an error if the variable cannot be read, the edit is rejected, or
/// the save fails.
pub fn edit_items(
    ctx: &CommandContext,
    name: &str,
    action: &ItemsAction,
    out: &mut dyn Write,
) -> Result<()> {
    let store = ctx.store();
    let raw = store.get(name)?;

    if matches!(action, ItemsAction::List) {
        if !raw.is_empty() {
            for (index, item) in codec::decode(&raw).items().into_iter().enumerate() {
                writeln!(out, "{index}: {item}")?;
            }
        }
        return Ok(());
    }

    let mut session = EditSession::from_snapshot([(name, raw.as_str())]);
    let id = session
        .find(name)
        .ok_or_else(|| anyhow!("'{name}' is missing from the edit session"))?;

    if raw.is_empty() {
        let item = first_item(action)?;
        session.set_raw(id, &codec::encode_items(&[item])?)?;
    } else {
        if !codec::is_list(&raw) {
            session.set_raw(id, &codec::encode_items(&[raw.as_str()])?)?;
        }
        let mut editor = session.open_list_editor(id)?;
        apply_action(&mut editor, action)?;
        editor.confirm()?;
    }

    let report = session.commit(&store, ctx.notifier(), ctx.policy());
    write_report(&report, out)?;
    ensure_saved(&report)
}

/// The item of an `add` into an empty variable.
fn first_item(action: &ItemsAction) -> std::result::Result<&str, EditError> {
    match action {
        ItemsAction::Add { item, at: None | Some(0) } => Ok(item.as_str()),
        ItemsAction::Add { at: Some(index), .. }
        | ItemsAction::Remove { index }
        | ItemsAction::Replace { index, .. }
        | ItemsAction::Move { from: index, .. } => Err(EditError::IndexOutOfRange {
            index: *index,
            len: 0,
        }),
        ItemsAction::List => Err(EditError::IndexOutOfRange { index: 0, len: 0 }),
    }
}

fn apply_action(
    editor: &mut ListEditor<'_>,
    action: &ItemsAction,
) -> std::result::Result<(), EditError> {
    match action {
        ItemsAction::List => {}
        ItemsAction::Add { item, at: None } => editor.push(item.as_str()),
        ItemsAction::Add { item, at: Some(index) } => editor.insert(*index, item.as_str())?,
        ItemsAction::Remove { index } => {
            editor.remove(*index)?;
        }
        ItemsAction::Replace { index, item } => {
            editor.replace(*index, item.as_str())?;
        }
        ItemsAction::Move { from, to } => editor.move_item(*from, *to)?,
    }
    Ok(())
}
