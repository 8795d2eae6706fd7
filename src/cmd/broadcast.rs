// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Broadcast command implementation for evedit.
//!
//! `broadcast --direct` is also what the re-exec notifier runs.

use crate::cli::var::BroadcastArgs;
use crate::config::Config;
use crate::error::Result;
use crate::notify::{ChangeNotifier, DirectNotifier, build_notifier};

/// Main handler for broadcast command.
///
/// # Errors
///
/// Returns an error if the broadcast fails.
pub fn run_broadcast_command(args: &BroadcastArgs, config: &Config) -> Result<()> {
    let notifier: Box<dyn ChangeNotifier> = if args.direct {
        Box::new(DirectNotifier::new(config.notify.timeout_ms))
    } else {
        build_notifier(&config.notify)
    };
    notifier.broadcast()?;
    tracing::info!(notifier = notifier.name(), "broadcast environment change");
    Ok(())
}
