//! Emit a standalone dataset event

use crate::app::App;
use crate::output;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct DatasetEventCmd {}

impl DatasetEventCmd {
    pub fn execute(&self, app: &App) -> Result<()> {
        let event = app.demos().dataset_event()?;
        output::success(&format!(
            "Emitted dataset event for {}/{}",
            event.dataset.namespace, event.dataset.name
        ));
        Ok(())
    }
}
