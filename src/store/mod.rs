// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable store.
//!
//! # Architecture
//!
//! ```text
//! EnvironmentStore { backend: &dyn Backend, location }
//!   get(name)      --> open(READ)  --> query          --> drop handle
//!   set(name, raw) --> open(FULL)  --> set_expandable --> flush --> drop handle
//!
//! Backend implementations:
//!   RegistryBackend  HKCU / HKLM keys, REG_EXPAND_SZ     (Windows)
//!   FileBackend      <root>/user.json, <root>/system.json
//!   MemoryBackend    in-memory, elevation switch          (tests)
//! ```
//!
//! - **No held handles**: every call opens and releases its own handle
//! - **Absence is not an error**: `get` of an unknown name returns `""`,
//!   `get_opt` returns `None`
//! - **No notification**: callers broadcast after a successful `set`

pub mod file;
pub mod memory;
pub mod name;
#[cfg(windows)]
pub mod registry;


use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::codec::{self, VariableValue};
use crate::error::{EvResult, NotifyError, StoreError};
use crate::notify::ChangeNotifier;
use crate::scope::{AccessRights, Location, Operation, Scope, ScopeResolver};

/// A persistence root that can open scope locations.
pub trait Backend {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Opens `location` with `access` rights.
    ///
    /// The returned handle is released when dropped.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AccessDenied`] if the caller lacks `access`, or
    /// [`StoreError::Unavailable`] if the location cannot be opened at all.
    fn open<'a>(
        &'a self,
        location: &Location,
        access: AccessRights,
    ) -> Result<Box<dyn KeyHandle + 'a>, StoreError>;
}

/// An open scope location.
pub trait KeyHandle {
    /// Reads a raw value, `None` if the name does not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the value exists but cannot be read.
    fn query(&self, name: &str) -> Result<Option<String>, StoreError>;

    /// Creates or overwrites `name` as an expandable string, unexpanded.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the value cannot be written.
    fn set_expandable(&mut self, name: &str, value: &str) -> Result<(), StoreError>;

    /// Makes previous writes durable.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend cannot persist the writes.
    fn flush(&mut self) -> Result<(), StoreError>;

    /// Lists the variable names at this location.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if enumeration fails.
    fn value_names(&self) -> Result<Vec<String>, StoreError>;
}

/// Read/write façade over one scope.
///
/// The scope is fixed for the lifetime of the store.
#[derive(Clone, Copy)]
pub struct EnvironmentStore<'a> {
    backend: &'a dyn Backend,
    location: Location,
}

impl std::fmt::Debug for EnvironmentStore<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvironmentStore")
            .field("backend", &self.backend.name())
            .field("location", &self.location)
            .finish()
    }
}

impl<'a> EnvironmentStore<'a> {
    #[must_use]
    pub fn new(backend: &'a dyn Backend, scope: Scope) -> Self {
        Self {
            backend,
            location: ScopeResolver::resolve(scope),
        }
    }

    #[must_use]
    pub const fn scope(&self) -> Scope {
        self.location.scope()
    }

    #[must_use]
    pub const fn location(&self) -> &Location {
        &self.location
    }

    fn open(&self, operation: Operation) -> Result<Box<dyn KeyHandle + 'a>, StoreError> {
        let access = self.location.required_access_for(operation);
        self.backend.open(&self.location, access)
    }

    /// Reads the raw value of `name`, `""` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the scope cannot be opened for reading.
    pub fn get(&self, name: &str) -> Result<String, StoreError> {
        self.get_opt(name).map(Option::unwrap_or_default)
    }

    /// Reads the raw value of `name`, telling an absent variable apart from
    /// an empty one.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the scope cannot be opened for reading.
    pub fn get_opt(&self, name: &str) -> Result<Option<String>, StoreError> {
        if name.is_empty() {
            return Ok(None);
        }
        let key = self.open(Operation::Read)?;
        let value = key.query(name)?;
        debug!(
            scope = %self.scope(),
            backend = self.backend.name(),
            name,
            found = value.is_some(),
            "read variable"
        );
        Ok(value)
    }

    /// Reads and decodes the value of `name`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the scope cannot be opened for reading.
    pub fn get_value(&self, name: &str) -> Result<VariableValue, StoreError> {
        self.get(name).map(|raw| codec::decode(&raw))
    }

    /// Creates or overwrites `name` with `raw`, durable on return.
    ///
    /// `%VAR%` references are stored literally. No broadcast is sent.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidName`] if `name` cannot be stored
    /// - [`StoreError::AccessDenied`] without write rights (System scope
    ///   from a non-elevated process)
    /// - [`StoreError::Unavailable`] if the backend cannot be opened
    pub fn set(&self, name: &str, raw: &str) -> Result<(), StoreError> {
        name::validate(name)?;
        let mut key = self.open(Operation::Write)?;
        key.set_expandable(name, raw)?;
        key.flush()?;
        info!(
            scope = %self.scope(),
            backend = self.backend.name(),
            name,
            "wrote variable"
        );
        Ok(())
    }

    /// Encodes `value` and writes it.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::error::EvError`] if encoding or the write fails.
    pub fn set_value(&self, name: &str, value: &VariableValue) -> EvResult<()> {
        let raw = codec::encode(value)?;
        self.set(name, &raw)?;
        Ok(())
    }

    /// Writes `name` and then broadcasts the change.
    ///
    /// A broadcast failure does not undo the write; it is logged and
    /// returned as `Ok(Some(_))`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the write fails. No broadcast is sent then.
    pub fn set_and_broadcast(
        &self,
        name: &str,
        raw: &str,
        notifier: &dyn ChangeNotifier,
    ) -> Result<Option<NotifyError>, StoreError> {
        self.set(name, raw)?;
        Ok(broadcast_logged(notifier))
    }

    /// Lists all variable names in this scope, sorted case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the scope cannot be enumerated.
    pub fn names(&self) -> Result<Vec<String>, StoreError> {
        let key = self.open(Operation::Read)?;
        let mut names = key.value_names()?;
        names.sort_by_cached_key(|n| n.to_ascii_lowercase());
        Ok(names)
    }

    /// Reads every variable in this scope.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the scope cannot be read.
    pub fn snapshot(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let key = self.open(Operation::Read)?;
        let mut vars = BTreeMap::new();
        for name in key.value_names()? {
            if let Some(value) = key.query(&name)? {
                vars.insert(name, value);
            }
        }
        Ok(vars)
    }
}

/// Broadcasts through `notifier`, logging a failure as a warning.
pub(crate) fn broadcast_logged(notifier: &dyn ChangeNotifier) -> Option<NotifyError> {
    match notifier.broadcast() {
        Ok(()) => {
            debug!(notifier = notifier.name(), "broadcast environment change");
            None
        }
        Err(NotifyError::Unsupported) => {
            debug!(
                notifier = notifier.name(),
                "no broadcast primitive on this platform"
            );
            Some(NotifyError::Unsupported)
        }
        Err(e) => {
            warn!(
                notifier = notifier.name(),
                "environment change was saved but not broadcast: {e}"
            );
            Some(e)
        }
    }
}
