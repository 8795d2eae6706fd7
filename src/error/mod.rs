// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!               EvError (16 bytes)
//!                     |
//!   +--------+--------+--------+--------+
//!   |        |        |        |        |
//!   v        v        v        v        v
//! Store   Notify    Codec     Edit    Config
//!  Box     Box       Box      Box      Box
//!
//! Sub-errors:
//!   Store   AccessDenied, Unavailable, InvalidName   (fatal for one variable)
//!   Notify  Failed, TimedOut, Unsupported, Spawn     (non-fatal warning)
//!   Codec   SeparatorInItem                          (never truncates data)
//!   Edit    UnknownEntry, NotAList, IndexOutOfRange
//!   Config  InvalidValue
//! ```

use thiserror::Error;

use crate::scope::Scope;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`EvError`].
pub type EvResult<T> = std::result::Result<T, EvError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum EvError {
    /// Persistence failed.
    #[error("store error: {0}")]
    Store(#[from] Box<StoreError>),

    /// Change broadcast failed.
    #[error("notify error: {0}")]
    Notify(#[from] Box<NotifyError>),

    /// Value could not be encoded.
    #[error("codec error: {0}")]
    Codec(#[from] Box<CodecError>),

    /// Working-copy edit was rejected.
    #[error("edit error: {0}")]
    Edit(#[from] Box<EditError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for EvError {
                fn from(err: $error) -> Self {
                    EvError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    StoreError => Store,
    NotifyError => Notify,
    CodecError => Codec,
    EditError => Edit,
    ConfigError => Config,
}

// --- Store Errors ---

/// Persistence errors for a single store operation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The caller lacks the rights to open the location with the requested access.
    #[error("access denied to {scope} environment at '{location}'{}", elevation_hint(.scope))]
    AccessDenied { scope: Scope, location: String },

    /// The persistence backend could not be opened at all.
    #[error("{scope} environment at '{location}' is unavailable: {message}")]
    Unavailable {
        scope: Scope,
        location: String,
        message: String,
    },

    /// The variable name cannot be stored.
    #[error("invalid variable name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },
}

const fn elevation_hint(scope: &Scope) -> &'static str {
    if scope.write_requires_elevation() {
        " (re-run as administrator)"
    } else {
        ""
    }
}

impl StoreError {
    /// Whether this error is a privilege failure.
    #[must_use]
    pub const fn is_access_denied(&self) -> bool {
        matches!(self, Self::AccessDenied { .. })
    }
}

// --- Notify Errors ---

/// Failure to deliver the environment-changed broadcast.
///
/// Never rolls back a persisted change.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The broadcast primitive reported failure.
    #[error("broadcast failed: {message}")]
    Failed { message: String },

    /// Some top-level window did not process the message in time.
    #[error("broadcast timed out after {timeout_ms} ms")]
    TimedOut { timeout_ms: u32 },

    /// No broadcast primitive exists on this platform.
    #[error("broadcast is not supported on this platform")]
    Unsupported,

    /// The re-exec helper could not be run.
    #[error("failed to run broadcast helper '{program}': {message}")]
    Spawn { program: String, message: String },
}

// --- Codec Errors ---

/// Separator collisions in list values.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A list item contains the separator and would be split on the next read.
    #[error("list item {index} contains the ';' separator and cannot be encoded: '{item}'")]
    SeparatorInItem { index: usize, item: String },
}

// --- Edit Errors ---

/// Rejected operations on an edit session.
#[derive(Debug, Error)]
pub enum EditError {
    /// The entry id does not address a live entry.
    #[error("no entry with id {id}")]
    UnknownEntry { id: usize },

    /// The list editor was requested for a single-valued variable.
    #[error("'{name}' is not a list value")]
    NotAList { name: String },

    /// A list position is past the end of the list.
    #[error("index {index} is out of range for a list of {len} items")]
    IndexOutOfRange { index: usize, len: usize },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}
