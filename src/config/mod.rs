// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for evedit.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. evedit.toml (cwd, optional)
//! 3. --ini FILE (repeatable)
//! 4. EVEDIT_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! EVEDIT_GLOBAL__SCOPE=system      → global.scope = "system"
//! EVEDIT_STORE__BACKEND=file       → store.backend = "file"
//! EVEDIT_NOTIFY__TIMEOUT_MS=1000   → notify.timeout_ms = 1000
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;

use loader::ConfigLoader;
use types::{GlobalConfig, NotifyConfig, StoreConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Persistence backend.
    pub store: StoreConfig,
    /// Change broadcast.
    pub notify: NotifyConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use evedit::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("evedit.toml")
    ///     .with_env_prefix("EVEDIT")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();

        options.insert(
            "global.output_log_level".to_string(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".to_string(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".to_string(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert(
            "global.log_timestamps".to_string(),
            self.global.log_timestamps.to_string(),
        );
        options.insert("global.scope".to_string(), self.global.scope.to_string());

        options.insert("store.backend".to_string(), self.store.backend.to_string());
        options.insert(
            "store.root".to_string(),
            self.store.root.display().to_string(),
        );

        options.insert(
            "notify.strategy".to_string(),
            self.notify.strategy.to_string(),
        );
        options.insert(
            "notify.timeout_ms".to_string(),
            self.notify.timeout_ms.to_string(),
        );
        options.insert("notify.batch".to_string(), self.notify.batch.to_string());

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
