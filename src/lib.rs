// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |       show / get / set / items / apply
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!              editor       store    notify
//!           EditSession   get/set   WM_SETTINGCHANGE
//!           ListEditor       |
//!                 |     +----+-----+
//!                 v     v          v
//!               codec  scope    backends
//!              ';' lists     registry/file/memory
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging, snapshot  |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod codec;
pub mod config;
pub mod editor;
pub mod error;
pub mod logging;
pub mod notify;
pub mod scope;
pub mod snapshot;
pub mod store;
