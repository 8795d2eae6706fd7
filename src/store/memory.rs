// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory backend.
//!
//! ```text
//! MemoryBackend
//!   user / system: BTreeMap<VarName, String>
//!   elevated:      false --> open(System, FULL) = AccessDenied
//!   unavailable:   true  --> every open = Unavailable
//!   writes:        successful set_expandable calls
//! ```

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::name::VarName;
use super::{Backend, KeyHandle};
use crate::error::StoreError;
use crate::scope::{AccessRights, Location, Scope};

#[derive(Debug, Default)]
struct MemoryState {
    user: BTreeMap<VarName, String>,
    system: BTreeMap<VarName, String>,
    elevated: bool,
    unavailable: bool,
    writes: usize,
}

impl MemoryState {
    const fn vars(&self, scope: Scope) -> &BTreeMap<VarName, String> {
        match scope {
            Scope::User => &self.user,
            Scope::System => &self.system,
        }
    }

    const fn vars_mut(&mut self, scope: Scope) -> &mut BTreeMap<VarName, String> {
        match scope {
            Scope::User => &mut self.user,
            Scope::System => &mut self.system,
        }
    }
}

/// Backend holding both scopes in memory.
///
/// Starts non-elevated, like an ordinary operator process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs as an elevated process: System scope becomes writable.
    #[must_use]
    pub fn elevated(self) -> Self {
        self.set_elevated(true);
        self
    }

    /// Seeds a variable without counting it as a write.
    #[must_use]
    pub fn with_var(self, scope: Scope, name: &str, value: &str) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state
                .vars_mut(scope)
                .insert(VarName::new(name), value.to_string());
        }
        self
    }

    pub fn set_elevated(&self, elevated: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.elevated = elevated;
        }
    }

    /// Makes every subsequent open fail as if the backend were corrupt.
    pub fn set_unavailable(&self, unavailable: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.unavailable = unavailable;
        }
    }

    /// Number of values written since creation.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.state.lock().map_or(0, |state| state.writes)
    }

    /// Current value of `name`, bypassing access checks.
    #[must_use]
    pub fn value(&self, scope: Scope, name: &str) -> Option<String> {
        self.state
            .lock()
            .ok()
            .and_then(|state| state.vars(scope).get(&VarName::new(name)).cloned())
    }
}

fn lock<'a>(
    state: &'a Mutex<MemoryState>,
    location: &Location,
) -> Result<MutexGuard<'a, MemoryState>, StoreError> {
    state.lock().map_err(|_| StoreError::Unavailable {
        scope: location.scope(),
        location: location.to_string(),
        message: "in-memory store lock is poisoned".to_string(),
    })
}

impl Backend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn open<'a>(
        &'a self,
        location: &Location,
        access: AccessRights,
    ) -> Result<Box<dyn KeyHandle + 'a>, StoreError> {
        let state = lock(&self.state, location)?;
        if state.unavailable {
            return Err(StoreError::Unavailable {
                scope: location.scope(),
                location: location.to_string(),
                message: "backend marked unavailable".to_string(),
            });
        }
        if access.allows_write() && location.scope().write_requires_elevation() && !state.elevated
        {
            return Err(StoreError::AccessDenied {
                scope: location.scope(),
                location: location.to_string(),
            });
        }
        drop(state);

        Ok(Box::new(MemoryKey {
            state: &self.state,
            location: *location,
            access,
        }))
    }
}

struct MemoryKey<'a> {
    state: &'a Mutex<MemoryState>,
    location: Location,
    access: AccessRights,
}

impl KeyHandle for MemoryKey<'_> {
    fn query(&self, name: &str) -> Result<Option<String>, StoreError> {
        let state = lock(self.state, &self.location)?;
        Ok(state
            .vars(self.location.scope())
            .get(&VarName::new(name))
            .cloned())
    }

    fn set_expandable(&mut self, name: &str, value: &str) -> Result<(), StoreError> {
        if !self.access.allows_write() {
            return Err(StoreError::AccessDenied {
                scope: self.location.scope(),
                location: self.location.to_string(),
            });
        }
        let mut state = lock(self.state, &self.location)?;
        state
            .vars_mut(self.location.scope())
            .insert(VarName::new(name), value.to_string());
        state.writes += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        Ok(())
    }

    fn value_names(&self) -> Result<Vec<String>, StoreError> {
        let state = lock(self.state, &self.location)?;
        Ok(state
            .vars(self.location.scope())
            .keys()
            .map(|k| k.as_str().to_string())
            .collect())
    }
}
