// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Persistence scopes and their resolution to concrete locations.
//!
//! ```text
//! Scope::User   --> HKEY_CURRENT_USER  \ Environment
//! Scope::System --> HKEY_LOCAL_MACHINE \ SYSTEM\CurrentControlSet\
//!                                        Control\Session Manager\Environment
//!
//! Operation::Read  --> AccessRights::READ  (no elevation)
//! Operation::Write --> AccessRights::FULL  (System needs elevation)
//! ```

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Registry path of the per-user environment.
pub const USER_ENVIRONMENT_PATH: &str = "Environment";

/// Registry path of the machine-wide environment.
pub const SYSTEM_ENVIRONMENT_PATH: &str =
    r"SYSTEM\CurrentControlSet\Control\Session Manager\Environment";

/// Persistence domain of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Per-user variables.
    #[default]
    User,
    /// Machine-wide variables. Writes require elevation.
    System,
}

impl Scope {
    /// Both scopes, user first.
    pub const ALL: [Self; 2] = [Self::User, Self::System];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::System => "system",
        }
    }

    /// Whether writing this scope requires an elevated process.
    #[must_use]
    pub const fn write_requires_elevation(self) -> bool {
        matches!(self, Self::System)
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Scope {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "system" | "machine" => Ok(Self::System),
            _ => Err(ConfigError::InvalidValue {
                section: "global".to_string(),
                key: "scope".to_string(),
                message: format!("expected 'user' or 'system', got '{s}'"),
            }),
        }
    }
}

/// Kind of store operation, used to pick the access rights to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
}

bitflags! {
    /// Access rights requested when opening a scope location.
    ///
    /// Bit values mirror the Win32 `KEY_*` access masks.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AccessRights: u32 {
        const QUERY_VALUE = 0x0001;
        const SET_VALUE = 0x0002;
        const ENUMERATE_VALUES = 0x0008;

        const READ = Self::QUERY_VALUE.bits() | Self::ENUMERATE_VALUES.bits();
        const FULL = Self::READ.bits() | Self::SET_VALUE.bits();
    }
}

impl AccessRights {
    /// Whether these rights allow modifying values.
    #[must_use]
    pub const fn allows_write(self) -> bool {
        self.contains(Self::SET_VALUE)
    }
}

/// Predefined persistence root a scope lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootKey {
    /// `HKEY_CURRENT_USER`
    CurrentUser,
    /// `HKEY_LOCAL_MACHINE`
    LocalMachine,
}

impl RootKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CurrentUser => "HKEY_CURRENT_USER",
            Self::LocalMachine => "HKEY_LOCAL_MACHINE",
        }
    }
}

/// A scope resolved to its concrete location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    scope: Scope,
    root: RootKey,
    path: &'static str,
}

impl Location {
    #[must_use]
    pub const fn scope(&self) -> Scope {
        self.scope
    }

    #[must_use]
    pub const fn root(&self) -> RootKey {
        self.root
    }

    #[must_use]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Access rights required to perform `operation` at this location.
    #[must_use]
    pub const fn required_access_for(&self, operation: Operation) -> AccessRights {
        match operation {
            Operation::Read => AccessRights::READ,
            Operation::Write => AccessRights::FULL,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\\{}", self.root.as_str(), self.path)
    }
}

/// Maps logical scopes to persistence locations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopeResolver;

impl ScopeResolver {
    #[must_use]
    pub const fn resolve(scope: Scope) -> Location {
        match scope {
            Scope::User => Location {
                scope,
                root: RootKey::CurrentUser,
                path: USER_ENVIRONMENT_PATH,
            },
            Scope::System => Location {
                scope,
                root: RootKey::LocalMachine,
                path: SYSTEM_ENVIRONMENT_PATH,
            },
        }
    }
}
