//! Multiply two numbers with the client injected under the configured slot

use crate::app::App;
use crate::output;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct MultiplyCmd {
    /// First factor
    pub a: i64,

    /// Second factor
    pub b: i64,
}

impl MultiplyCmd {
    pub fn execute(&self, app: &App) -> Result<()> {
        let result = app.demos().multiply(self.a, self.b)?;
        output::detail("Result", &result.to_string());
        Ok(())
    }
}
