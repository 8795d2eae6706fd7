// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers --> CommandContext { backend, notifier, scope }
//!   show, get, set, items, apply, broadcast, config
//! ```
//!
//! Each `run_*` handler writes to stdout; the function it wraps takes the
//! context and an output sink so it can run against any backend.

pub mod apply;
pub mod broadcast;
pub mod config;
pub mod context;
pub mod get;
pub mod items;
pub mod report;
pub mod set;
pub mod show;

#[cfg(test)]
mod tests;
