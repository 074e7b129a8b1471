// SPDX-License-Identifier: AGPL-3.0
// Copyright (C) 2026 olkit Contributors

//! Multiply inside a tracked run (START and COMPLETE events)

use crate::app::App;
use crate::output;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct TrackCmd {
    /// First factor
    pub a: i64,

    /// Second factor
    pub b: i64,

    /// Organizational namespace prefix (e.g. "company")
    #[arg(long)]
    pub prefix: Option<String>,

    /// Environment label; defaults to the configured environment
    #[arg(short, long)]
    pub environment: Option<String>,
}

impl TrackCmd {
    pub fn execute(&self, app: &App) -> Result<()> {
        let demos = app.demos();
        let result = demos.track(
            self.a,
            self.b,
            self.prefix.as_deref(),
            self.environment.as_deref(),
        )?;

        output::header("Manual lineage tracking");
        output::detail(
            "Namespace",
            &demos.namespace(self.prefix.as_deref(), self.environment.as_deref())?,
        );
        output::detail("Result", &result.to_string());
        output::success("Emitted START and COMPLETE events");
        Ok(())
    }
}
