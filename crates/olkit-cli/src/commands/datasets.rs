// SPDX-License-Identifier: AGPL-3.0
// Copyright (C) 2026 olkit Contributors

//! Process sample records inside a run with faceted input and output datasets

use crate::app::App;
use crate::demos::sample_records;
use crate::output;
use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct DatasetsCmd {
    /// Organizational namespace prefix (e.g. "company")
    #[arg(long)]
    pub prefix: Option<String>,

    /// Environment label; defaults to the configured environment
    #[arg(short, long)]
    pub environment: Option<String>,

    /// JSON array of records to process instead of the built-in sample
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,
}

impl DatasetsCmd {
    pub fn execute(&self, app: &App) -> Result<()> {
        let records = match &self.input {
            Some(path) => read_records(path)?,
            None => sample_records(),
        };

        let processed = app.demos().datasets(
            records,
            self.prefix.as_deref(),
            self.environment.as_deref(),
        )?;

        // Only the records go to stdout so the output can be piped
        output::json(&Value::Array(processed))
    }
}

fn read_records(path: &Path) -> Result<Vec<Value>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON array of records", path.display()))
}
