//! Print a lineage namespace

use crate::output;
use anyhow::Result;
use clap::Args;
use olkit_namespace::build_namespace;

#[derive(Debug, Args)]
pub struct NamespaceCmd {
    /// Project name; sanitized to lowercase alphanumerics and underscores
    pub project: String,

    /// Environment label, used as given
    pub environment: String,

    /// Organizational prefix
    #[arg(long)]
    pub prefix: Option<String>,

    /// Leave the short hostname off
    #[arg(long)]
    pub no_hostname: bool,
}

impl NamespaceCmd {
    pub fn execute(&self) -> Result<()> {
        let namespace = build_namespace(
            &self.project,
            &self.environment,
            self.prefix.as_deref(),
            !self.no_hostname,
        )?;
        output::plain(&namespace);
        Ok(())
    }
}
