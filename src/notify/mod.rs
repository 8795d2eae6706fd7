// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment change broadcast.
//!
//! ```text
//! NotifyStrategy --> build_notifier() --> Box<dyn ChangeNotifier>
//!   direct  DirectNotifier    WM_SETTINGCHANGE "Environment" to HWND_BROADCAST
//!   reexec  ReexecNotifier    <current exe> -l 1 broadcast --direct
//!   auto    FallbackNotifier  direct, then reexec on failure
//!   off     DisabledNotifier  no-op
//! ```
//!
//! A failed broadcast never rolls back a persisted write. It does not need
//! elevation either.

#[cfg(windows)]
mod windows;


use std::cell::Cell;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::types::NotifyConfig;
use crate::error::{ConfigError, NotifyError};

/// Sends the system-wide "environment changed" signal.
pub trait ChangeNotifier {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Broadcasts the change to all top-level windows.
    ///
    /// # Errors
    ///
    /// Returns a [`NotifyError`] if the broadcast could not be delivered.
    fn broadcast(&self) -> Result<(), NotifyError>;
}

/// How the change broadcast is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyStrategy {
    /// Direct, falling back to a re-exec helper.
    #[default]
    Auto,
    /// In-process broadcast.
    Direct,
    /// Broadcast from a child process.
    Reexec,
    /// Never broadcast.
    Off,
}

impl std::fmt::Display for NotifyStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Direct => write!(f, "direct"),
            Self::Reexec => write!(f, "reexec"),
            Self::Off => write!(f, "off"),
        }
    }
}

impl std::str::FromStr for NotifyStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "direct" => Ok(Self::Direct),
            "reexec" => Ok(Self::Reexec),
            "off" => Ok(Self::Off),
            _ => Err(ConfigError::InvalidValue {
                section: "notify".to_string(),
                key: "strategy".to_string(),
                message: format!("expected 'auto', 'direct', 'reexec', or 'off', got '{s}'"),
            }),
        }
    }
}

/// Builds the notifier selected by `config`.
#[must_use]
pub fn build_notifier(config: &NotifyConfig) -> Box<dyn ChangeNotifier> {
    match config.strategy {
        NotifyStrategy::Direct => Box::new(DirectNotifier::new(config.timeout_ms)),
        NotifyStrategy::Reexec => Box::new(ReexecNotifier::current_exe()),
        NotifyStrategy::Auto => Box::new(FallbackNotifier::new(
            Box::new(DirectNotifier::new(config.timeout_ms)),
            Box::new(ReexecNotifier::current_exe()),
        )),
        NotifyStrategy::Off => Box::new(DisabledNotifier),
    }
}

/// Broadcasts `WM_SETTINGCHANGE` from the current process.
#[derive(Debug, Clone, Copy)]
pub struct DirectNotifier {
    #[cfg_attr(not(windows), allow(dead_code))]
    timeout_ms: u32,
}

impl DirectNotifier {
    #[must_use]
    pub const fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }
}

impl ChangeNotifier for DirectNotifier {
    fn name(&self) -> &'static str {
        "direct"
    }

    #[cfg(windows)]
    fn broadcast(&self) -> Result<(), NotifyError> {
        windows::broadcast_environment_change(self.timeout_ms)
    }

    #[cfg(not(windows))]
    fn broadcast(&self) -> Result<(), NotifyError> {
        Err(NotifyError::Unsupported)
    }
}

/// Broadcasts by running a helper process.
#[derive(Debug, Clone)]
pub struct ReexecNotifier {
    program: Option<PathBuf>,
    args: Vec<String>,
}

impl ReexecNotifier {
    /// Runs `program` with `args`; success is a zero exit status.
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: Some(program.into()),
            args,
        }
    }

    /// Re-runs this executable as `-l 1 broadcast --direct`.
    #[must_use]
    pub fn current_exe() -> Self {
        let program = std::env::current_exe()
            .inspect_err(|e| warn!("cannot locate current executable for broadcast: {e}"))
            .ok();
        Self {
            program,
            args: ["-l", "1", "broadcast", "--direct"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

impl ChangeNotifier for ReexecNotifier {
    fn name(&self) -> &'static str {
        "reexec"
    }

    fn broadcast(&self) -> Result<(), NotifyError> {
        let Some(program) = &self.program else {
            return Err(NotifyError::Spawn {
                program: "<current executable>".to_string(),
                message: "executable path is unknown".to_string(),
            });
        };

        debug!(program = %program.display(), args = ?self.args, "running broadcast helper");
        let status = Command::new(program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .map_err(|e| NotifyError::Spawn {
                program: program.display().to_string(),
                message: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(NotifyError::Failed {
                message: format!("broadcast helper exited with {status}"),
            })
        }
    }
}

/// Tries `primary`, then `fallback` unless `primary` is unsupported here.
pub struct FallbackNotifier {
    primary: Box<dyn ChangeNotifier>,
    fallback: Box<dyn ChangeNotifier>,
}

impl FallbackNotifier {
    #[must_use]
    pub fn new(primary: Box<dyn ChangeNotifier>, fallback: Box<dyn ChangeNotifier>) -> Self {
        Self { primary, fallback }
    }
}

impl ChangeNotifier for FallbackNotifier {
    fn name(&self) -> &'static str {
        "auto"
    }

    fn broadcast(&self) -> Result<(), NotifyError> {
        match self.primary.broadcast() {
            Ok(()) => Ok(()),
            // The helper runs the same primitive, so it cannot do better.
            Err(NotifyError::Unsupported) => Err(NotifyError::Unsupported),
            Err(e) => {
                debug!(
                    primary = self.primary.name(),
                    fallback = self.fallback.name(),
                    "primary broadcast failed, falling back: {e}"
                );
                self.fallback.broadcast()
            }
        }
    }
}

/// Never broadcasts.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNotifier;

impl ChangeNotifier for DisabledNotifier {
    fn name(&self) -> &'static str {
        "off"
    }

    fn broadcast(&self) -> Result<(), NotifyError> {
        debug!("broadcast disabled by configuration");
        Ok(())
    }
}

/// Counts broadcasts and optionally fails them.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    calls: Cell<usize>,
    fail: bool,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose every broadcast fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            calls: Cell::new(0),
            fail: true,
        }
    }

    /// Number of broadcast attempts so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl ChangeNotifier for RecordingNotifier {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn broadcast(&self) -> Result<(), NotifyError> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            Err(NotifyError::Failed {
                message: "simulated failure".to_string(),
            })
        } else {
            Ok(())
        }
    }
}
