// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only view of the environment this process inherited.
//!
//! Used for display only. It reflects the environment at process start and
//! never the persisted scopes.

/// Captures the current process environment, sorted case-insensitively.
///
/// Non-UTF-8 names and values are converted lossily. Hidden per-drive
/// entries (`=C:`) are skipped.
#[must_use]
pub fn process_snapshot() -> Vec<(String, String)> {
    let mut vars: Vec<(String, String)> = std::env::vars_os()
        .map(|(name, value)| {
            (
                name.to_string_lossy().into_owned(),
                value.to_string_lossy().into_owned(),
            )
        })
        .filter(|(name, _)| !name.starts_with('='))
        .collect();
    vars.sort_by_cached_key(|(name, _)| name.to_ascii_lowercase());
    vars
}
