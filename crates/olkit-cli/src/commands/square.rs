//! Square a number with the client injected under `lineage_client`

use crate::app::App;
use crate::demos::{CUSTOM_CLIENT_PARAM, CUSTOM_URL};
use crate::output;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct SquareCmd {
    /// Number to square
    pub x: i64,
}

impl SquareCmd {
    pub fn execute(&self, app: &App) -> Result<()> {
        let result = app.demos().square(self.x)?;
        output::detail("Result", &result.to_string());

        // First construction wins; report when the custom URL did not take effect
        if let Some(url) = olkit_client::global().configured_url() {
            if url != CUSTOM_URL {
                output::warning(&format!(
                    "Client already bound to {}; {} was ignored for slot '{}'",
                    url, CUSTOM_URL, CUSTOM_CLIENT_PARAM
                ));
            }
        }
        Ok(())
    }
}
