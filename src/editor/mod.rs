// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory working copy of one scope's variables.
//!
//! # Entry Lifecycle
//!
//! ```text
//! from_snapshot --> Clean ----rename/set_raw/confirm----> Edited
//! add()         ----------------------------------------> Edited
//!
//! commit(store, notifier, policy):
//!   Edited --stored == value-----> Saved   (no write; absent != "")
//!   Edited --store.set ok--------> Saved   (broadcast: per variable | batched)
//!   Edited --store error---------> Edited  (reported, retried next commit)
//!
//! remove(ids) --> Removed  (working copy only, never a store call)
//! ```
//!
//! Ids are stable for the lifetime of the session; removed entries are
//! dropped on the next commit.

mod list;

#[cfg(test)]
mod tests;

pub use list::ListEditor;

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::codec::{self, VariableValue};
use crate::error::{EditError, NotifyError, StoreError};
use crate::notify::ChangeNotifier;
use crate::store::{self, EnvironmentStore, name};

/// Addresses one entry of an [`EditSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(usize);

impl EntryId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-entry state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    /// Unchanged since the snapshot.
    Clean,
    /// Changed in the working copy, not yet persisted.
    Edited,
    /// Persisted by the last commit.
    Saved,
    /// Deleted from the working copy.
    Removed,
}

/// When the change notification is sent during a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BroadcastPolicy {
    /// After every successful write.
    #[default]
    PerVariable,
    /// Once after the last write of the commit.
    Batched,
}

impl BroadcastPolicy {
    #[must_use]
    pub const fn from_batch(batch: bool) -> Self {
        if batch { Self::Batched } else { Self::PerVariable }
    }
}

/// One variable in the working copy.
#[derive(Debug, Clone)]
pub struct Entry {
    name: String,
    raw: String,
    state: EntryState,
    /// Known to exist in the store (came from the snapshot or was saved).
    persisted: bool,
}

impl Entry {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw value as it will be persisted.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn value(&self) -> VariableValue {
        codec::decode(&self.raw)
    }

    #[must_use]
    pub const fn state(&self) -> EntryState {
        self.state
    }

    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.persisted
    }
}

/// A failed entry of a commit.
#[derive(Debug)]
pub struct SaveFailure {
    pub id: EntryId,
    pub name: String,
    pub error: StoreError,
}

/// Outcome of [`EditSession::commit`].
#[derive(Debug, Default)]
pub struct SaveReport {
    /// Names written to the store.
    pub saved: Vec<String>,
    /// Names whose stored value already matched.
    pub unchanged: Vec<String>,
    /// Entries left `Edited` because the store rejected them.
    pub failed: Vec<SaveFailure>,
    /// Persisted names removed from the working copy. They remain in the store.
    pub removed: Vec<String>,
    /// Broadcasts that were attempted.
    pub broadcasts: usize,
    /// Broadcasts that failed. The writes are still persisted.
    pub notify_failures: Vec<NotifyError>,
}

impl SaveReport {
    /// True if every edited entry was saved or already up to date.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Working copy of `{name -> value}` pairs with per-entry state.
#[derive(Debug, Default)]
pub struct EditSession {
    entries: BTreeMap<EntryId, Entry>,
    next_id: usize,
}

impl EditSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session whose entries are all `Clean` and persisted.
    pub fn from_snapshot<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut session = Self::new();
        for (name, raw) in vars {
            session.push_entry(Entry {
                name: name.into(),
                raw: raw.into(),
                state: EntryState::Clean,
                persisted: true,
            });
        }
        session
    }

    /// Creates a session from every variable of `store`'s scope.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the scope cannot be read.
    pub fn from_store(store: &EnvironmentStore<'_>) -> Result<Self, StoreError> {
        Ok(Self::from_snapshot(store.snapshot()?))
    }

    fn push_entry(&mut self, entry: Entry) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, entry);
        id
    }

    fn live_mut(&mut self, id: EntryId) -> Result<&mut Entry, EditError> {
        self.entries
            .get_mut(&id)
            .filter(|e| e.state != EntryState::Removed)
            .ok_or(EditError::UnknownEntry { id: id.0 })
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live entries in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &Entry)> {
        self.entries
            .iter()
            .filter(|(_, e)| e.state != EntryState::Removed)
            .map(|(id, e)| (*id, e))
    }

    /// Looks up an entry. Removed entries stay visible until the next commit.
    #[must_use]
    pub fn entry(&self, id: EntryId) -> Option<&Entry> {
        self.entries.get(&id)
    }

    /// Finds the first live entry named `name`, ignoring case.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<EntryId> {
        self.iter()
            .find(|(_, e)| e.name.eq_ignore_ascii_case(name))
            .map(|(id, _)| id)
    }

    /// Decoded value of a live entry.
    #[must_use]
    pub fn value(&self, id: EntryId) -> Option<VariableValue> {
        self.entries
            .get(&id)
            .filter(|e| e.state != EntryState::Removed)
            .map(Entry::value)
    }

    /// True if any entry is `Edited` or a persisted entry was removed.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.entries.values().any(|e| {
            e.state == EntryState::Edited || (e.state == EntryState::Removed && e.persisted)
        })
    }

    /// Adds an entry with empty name and value, ready for naming.
    pub fn add(&mut self) -> EntryId {
        let id = self.push_entry(Entry {
            name: String::new(),
            raw: String::new(),
            state: EntryState::Edited,
            persisted: false,
        });
        debug!(%id, "added entry");
        id
    }

    /// Sets `name` to `raw`, adding an entry if none exists.
    pub fn upsert(&mut self, name: &str, raw: &str) -> EntryId {
        if let Some(id) = self.find(name) {
            if let Some(entry) = self.entries.get_mut(&id)
                && entry.raw != raw
            {
                entry.raw = raw.to_string();
                entry.state = EntryState::Edited;
            }
            return id;
        }
        self.push_entry(Entry {
            name: name.to_string(),
            raw: raw.to_string(),
            state: EntryState::Edited,
            persisted: false,
        })
    }

    /// Removes entries from the working copy. An empty selection is a no-op.
    ///
    /// Unknown or already removed ids are ignored.
    pub fn remove(&mut self, selection: &[EntryId]) {
        for id in selection {
            if let Some(entry) = self.entries.get_mut(id)
                && entry.state != EntryState::Removed
            {
                debug!(%id, name = %entry.name, "removed entry");
                entry.state = EntryState::Removed;
            }
        }
    }

    /// Renames an entry.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownEntry`] if `id` is not live.
    pub fn rename(&mut self, id: EntryId, name: &str) -> Result<(), EditError> {
        let entry = self.live_mut(id)?;
        if entry.name != name {
            entry.name = name.to_string();
            entry.state = EntryState::Edited;
        }
        Ok(())
    }

    /// Replaces an entry's raw value.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownEntry`] if `id` is not live.
    pub fn set_raw(&mut self, id: EntryId, raw: &str) -> Result<(), EditError> {
        let entry = self.live_mut(id)?;
        if entry.raw != raw {
            entry.raw = raw.to_string();
            entry.state = EntryState::Edited;
        }
        Ok(())
    }

    /// Opens the multi-value editor on a list entry.
    ///
    /// # Errors
    ///
    /// - [`EditError::UnknownEntry`] if `id` is not live
    /// - [`EditError::NotAList`] if the value does not classify as a list
    pub fn open_list_editor(&mut self, id: EntryId) -> Result<ListEditor<'_>, EditError> {
        let entry = self.live_mut(id)?;
        let VariableValue::List(items) = entry.value() else {
            return Err(EditError::NotAList {
                name: entry.name.clone(),
            });
        };
        Ok(ListEditor::new(self, id, items))
    }

    /// Commits every `Edited` entry to `store`.
    ///
    /// Entries whose stored value already matches are marked `Saved` without
    /// a write. An absent variable never matches, so a new empty entry is
    /// still created. A store failure is recorded and leaves that entry `Edited`;
    /// the remaining entries are still attempted.
    pub fn commit(
        &mut self,
        store: &EnvironmentStore<'_>,
        notifier: &dyn ChangeNotifier,
        policy: BroadcastPolicy,
    ) -> SaveReport {
        let mut report = SaveReport::default();

        for (&id, entry) in &mut self.entries {
            if entry.state != EntryState::Edited {
                continue;
            }

            let written = name::validate(&entry.name)
                .and_then(|()| store.get_opt(&entry.name))
                .and_then(|current| {
                    if current.as_deref() == Some(entry.raw.as_str()) {
                        Ok(false)
                    } else {
                        store.set(&entry.name, &entry.raw).map(|()| true)
                    }
                });

            match written {
                Ok(true) => {
                    entry.state = EntryState::Saved;
                    entry.persisted = true;
                    report.saved.push(entry.name.clone());
                    if policy == BroadcastPolicy::PerVariable {
                        report.broadcasts += 1;
                        report.notify_failures.extend(store::broadcast_logged(notifier));
                    }
                }
                Ok(false) => {
                    entry.state = EntryState::Saved;
                    entry.persisted = true;
                    report.unchanged.push(entry.name.clone());
                }
                Err(error) => {
                    report.failed.push(SaveFailure {
                        id,
                        name: entry.name.clone(),
                        error,
                    });
                }
            }
        }

        if policy == BroadcastPolicy::Batched && !report.saved.is_empty() {
            report.broadcasts += 1;
            report.notify_failures.extend(store::broadcast_logged(notifier));
        }

        self.entries.retain(|_, entry| {
            if entry.state != EntryState::Removed {
                return true;
            }
            if entry.persisted {
                report.removed.push(entry.name.clone());
            }
            false
        });

        info!(
            scope = %store.scope(),
            saved = report.saved.len(),
            unchanged = report.unchanged.len(),
            failed = report.failed.len(),
            removed = report.removed.len(),
            "committed edit session"
        );
        report
    }

    /// Current working copy in creation order, removed entries omitted.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(String, String)> {
        self.iter()
            .map(|(_, e)| (e.name.clone(), e.raw.clone()))
            .collect()
    }
}
