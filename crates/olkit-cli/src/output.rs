// olkit - OpenLineage integration toolkit
// Copyright (C) 2026 olkit Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.

//! Terminal output for the olkit commands.
//!
//! Human-facing lines go to stdout with a coloured marker; errors go to
//! stderr. Machine-readable results ([`json`], [`plain`]) carry no styling so
//! they can be piped.
//!
//! ```rust
//! use olkit_cli::output;
//!
//! output::header("Client injection");
//! output::detail("Result", "28");
//! output::success("Emitted 2 events");
//! ```

use anyhow::Result;
use console::style;
use serde_json::Value;

/// Print a success message with a green check mark.
pub fn success(msg: &str) {
    println!("{} {}", style("✔").green().bold(), msg);
}

/// Print an error message to stderr with a red cross.
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✘").red().bold(), msg);
}

/// Print a warning with a yellow marker.
pub fn warning(msg: &str) {
    println!("{} {}", style("!").yellow().bold(), msg);
}

/// Print a key-value line; the value is highlighted.
///
/// ```rust
/// olkit_cli::output::detail("Namespace", "company.analytics.staging");
/// // Output:
/// //   Namespace: company.analytics.staging
/// ```
pub fn detail(key: &str, value: &str) {
    println!("  {}: {}", key, style(value).cyan());
}

/// Print a section header.
pub fn header(msg: &str) {
    println!("{} {}", style("▶").blue().bold(), style(msg).bold());
}

/// Print a bare line, for output meant to be captured by scripts.
pub fn plain(msg: &str) {
    println!("{}", msg);
}

/// Print a value as pretty JSON.
pub fn json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
