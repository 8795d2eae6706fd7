// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for evedit.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, StoreConfig, NotifyConfig
//! BackendKind: Registry (Windows default) | File (default elsewhere)
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::logging::LogLevel;
use crate::notify::NotifyStrategy;
use crate::scope::Scope;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for stdout output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Prefix console log lines with a timestamp.
    pub log_timestamps: bool,
    /// Scope used when a command does not name one.
    pub scope: Scope,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
            log_timestamps: false,
            scope: Scope::User,
        }
    }
}

/// Persistence backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Windows registry.
    Registry,
    /// JSON documents under `store.root`.
    File,
}

impl Default for BackendKind {
    fn default() -> Self {
        if cfg!(windows) {
            Self::Registry
        } else {
            Self::File
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registry => write!(f, "registry"),
            Self::File => write!(f, "file"),
        }
    }
}

impl std::str::FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "registry" => Ok(Self::Registry),
            "file" => Ok(Self::File),
            _ => Err(ConfigError::InvalidValue {
                section: "store".to_string(),
                key: "backend".to_string(),
                message: format!("expected 'registry' or 'file', got '{s}'"),
            }),
        }
    }
}

/// Store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Which backend persists variables.
    pub backend: BackendKind,
    /// Directory of the file backend.
    pub root: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            root: PathBuf::from("evedit-store"),
        }
    }
}

/// Change broadcast configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotifyConfig {
    /// How the broadcast is delivered.
    pub strategy: NotifyStrategy,
    /// Per-window timeout of the broadcast, in milliseconds.
    pub timeout_ms: u32,
    /// Broadcast once after a multi-variable save instead of after each write.
    pub batch: bool,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            strategy: NotifyStrategy::Auto,
            timeout_ms: 5000,
            batch: false,
        }
    }
}
