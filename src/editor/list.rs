// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Item-level editing of a list value.
//!
//! ```text
//! open_list_editor(id) --> ListEditor { items }
//!   insert / push / remove / replace / move_item   (local copy only)
//!   confirm --> encode_items --> entry.raw, Edited
//!   cancel / drop --> working copy unchanged
//! ```

use super::{EditSession, EntryId, EntryState};
use crate::codec;
use crate::error::{EditError, EvResult};

/// Editor over the items of one list entry.
///
/// Changes stay local until [`ListEditor::confirm`].
#[derive(Debug)]
pub struct ListEditor<'a> {
    session: &'a mut EditSession,
    id: EntryId,
    items: Vec<String>,
}

impl<'a> ListEditor<'a> {
    pub(super) fn new(session: &'a mut EditSession, id: EntryId, items: Vec<String>) -> Self {
        Self { session, id, items }
    }

    #[must_use]
    pub const fn id(&self) -> EntryId {
        self.id
    }

    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Inserts `item` before position `index`; `index == len` appends.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::IndexOutOfRange`] if `index > len`.
    pub fn insert(&mut self, index: usize, item: impl Into<String>) -> Result<(), EditError> {
        let len = self.items.len();
        if index > len {
            return Err(EditError::IndexOutOfRange { index, len });
        }
        self.items.insert(index, item.into());
        Ok(())
    }

    pub fn push(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
    }

    /// Removes and returns the item at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::IndexOutOfRange`] if there is no such item.
    pub fn remove(&mut self, index: usize) -> Result<String, EditError> {
        check_index(index, self.items.len())?;
        Ok(self.items.remove(index))
    }

    /// Replaces the item at `index`, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::IndexOutOfRange`] if there is no such item.
    pub fn replace(&mut self, index: usize, item: impl Into<String>) -> Result<String, EditError> {
        check_index(index, self.items.len())?;
        Ok(std::mem::replace(&mut self.items[index], item.into()))
    }

    /// Moves the item at `from` so that it ends up at position `to`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::IndexOutOfRange`] if either position is past the
    /// last item.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), EditError> {
        let len = self.items.len();
        check_index(from, len)?;
        check_index(to, len)?;
        let item = self.items.remove(from);
        self.items.insert(to, item);
        Ok(())
    }

    /// Writes the items back to the entry, with a trailing separator.
    ///
    /// # Errors
    ///
    /// Returns a codec error, leaving the entry unchanged, if an item
    /// contains the separator.
    pub fn confirm(self) -> EvResult<()> {
        let raw = codec::encode_items(&self.items)?;
        let entry = self.session.live_mut(self.id)?;
        if entry.raw != raw {
            entry.raw = raw;
            entry.state = EntryState::Edited;
        }
        Ok(())
    }

    /// Discards the item edits.
    pub fn cancel(self) {}
}

const fn check_index(index: usize, len: usize) -> Result<(), EditError> {
    if index < len {
        Ok(())
    } else {
        Err(EditError::IndexOutOfRange { index, len })
    }
}
