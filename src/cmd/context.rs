// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared state of a single command run.

use crate::cli::var::ScopeArg;
use crate::config::Config;
use crate::config::types::{BackendKind, StoreConfig};
use crate::editor::BroadcastPolicy;
use crate::error::Result;
use crate::notify::{ChangeNotifier, build_notifier};
use crate::scope::Scope;
use crate::store::file::FileBackend;
use crate::store::{Backend, EnvironmentStore};

/// Opens the backend selected by `config`.
///
/// # Errors
///
/// Returns an error if the backend does not exist on this platform.
pub fn open_backend(config: &StoreConfig) -> Result<Box<dyn Backend>> {
    match config.backend {
        BackendKind::File => Ok(Box::new(FileBackend::new(&config.root))),
        #[cfg(windows)]
        BackendKind::Registry => Ok(Box::new(crate::store::registry::RegistryBackend::new())),
        #[cfg(not(windows))]
        BackendKind::Registry => Err(anyhow::anyhow!(
            "the registry backend is only available on Windows, use store.backend = \"file\""
        )),
    }
}

/// Backend, notifier and scope for one command.
pub struct CommandContext {
    backend: Box<dyn Backend>,
    notifier: Box<dyn ChangeNotifier>,
    scope: Scope,
    policy: BroadcastPolicy,
}

impl CommandContext {
    #[must_use]
    pub fn new(
        backend: Box<dyn Backend>,
        notifier: Box<dyn ChangeNotifier>,
        scope: Scope,
        policy: BroadcastPolicy,
    ) -> Self {
        Self {
            backend,
            notifier,
            scope,
            policy,
        }
    }

    /// Builds the context from configuration; `scope` overrides `global.scope`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured backend cannot be opened.
    pub fn from_config(config: &Config, scope: Option<ScopeArg>) -> Result<Self> {
        let backend = open_backend(&config.store)?;
        let scope = scope.map_or(config.global.scope, Scope::from);
        tracing::debug!(
            backend = backend.name(),
            %scope,
            notify = %config.notify.strategy,
            "command context"
        );
        Ok(Self::new(
            backend,
            build_notifier(&config.notify),
            scope,
            BroadcastPolicy::from_batch(config.notify.batch),
        ))
    }

    #[must_use]
    pub const fn scope(&self) -> Scope {
        self.scope
    }

    #[must_use]
    pub const fn policy(&self) -> BroadcastPolicy {
        self.policy
    }

    #[must_use]
    pub fn notifier(&self) -> &dyn ChangeNotifier {
        self.notifier.as_ref()
    }

    /// Store over the context's scope.
    #[must_use]
    pub fn store(&self) -> EnvironmentStore<'_> {
        self.store_for(self.scope)
    }

    #[must_use]
    pub fn store_for(&self, scope: Scope) -> EnvironmentStore<'_> {
        EnvironmentStore::new(self.backend.as_ref(), scope)
    }
}

impl std::fmt::Debug for CommandContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandContext")
            .field("backend", &self.backend.name())
            .field("notifier", &self.notifier.name())
            .field("scope", &self.scope)
            .field("policy", &self.policy)
            .finish()
    }
}
