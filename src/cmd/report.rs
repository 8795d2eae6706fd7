// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Save report output shared by `items` and `apply`.

use std::io::Write;

use anyhow::anyhow;

use crate::editor::SaveReport;
use crate::error::Result;

/// Writes one line per saved, unchanged, failed or removed variable.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn write_report(report: &SaveReport, out: &mut dyn Write) -> Result<()> {
    for name in &report.saved {
        writeln!(out, "saved     {name}")?;
    }
    for name in &report.unchanged {
        writeln!(out, "unchanged {name}")?;
    }
    for name in &report.removed {
        writeln!(out, "dropped   {name} (still stored)")?;
    }
    for failure in &report.failed {
        writeln!(out, "failed    {}: {}", failure.name, failure.error)?;
    }
    Ok(())
}

/// Turns a report with failed entries into an error.
///
/// # Errors
///
/// Returns an error naming the first failure if any entry was not saved.
pub fn ensure_saved(report: &SaveReport) -> Result<()> {
    match report.failed.first() {
        None => Ok(()),
        Some(first) => Err(anyhow!(
            "{} variable(s) could not be saved: {}",
            report.failed.len(),
            first.error
        )),
    }
}
