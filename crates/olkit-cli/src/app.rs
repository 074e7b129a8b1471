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

//! Startup: global flags, configuration and logging.
//!
//! Precedence is command-line flag, then environment, then config file, then
//! built-in defaults. Everything is resolved once into an [`App`].

use crate::demos::Demos;
use anyhow::{Context, Result};
use clap::Args;
use olkit_client::{global, FileTransport, InjectOptions, OpenLineageClient};
use olkit_config::{Config, ConfigLoader, TransportConfig, Validator};
use olkit_observability::{
    configure_lineage_logging, init_tracing_with_config, LineageLoggers, Severity,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Flags accepted by every command
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Config file (TOML, YAML or JSON); defaults to ./olkit.toml when present
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Threshold for the openlineage log channels (DEBUG, INFO, ..., or 10-50)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<Severity>,

    /// Also append channel records to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Line template for channel records, e.g. "{levelname}: {message}"
    #[arg(long, global = true, value_name = "TEMPLATE")]
    pub log_format: Option<String>,

    /// Debug-level application output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// No application log output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl GlobalArgs {
    /// Load the config file and environment, then apply these flags
    pub async fn resolve_config(&self) -> Result<Config> {
        let loader = ConfigLoader::new();
        let mut config = match &self.config {
            Some(path) => loader
                .load_with_overrides(path)
                .await
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Config::load(std::env::current_dir()?)
                .await
                .context("Failed to load configuration")?,
        };
        self.apply(&mut config)?;
        Ok(config)
    }

    /// Overlay the command-line flags on a loaded config
    pub fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
        if let Some(format) = &self.log_format {
            config.logging.format = Some(format.clone());
        }
        if self.verbose {
            config.logging.app_level = "debug".to_string();
        }
        config.validate()?;
        Ok(())
    }
}

/// Resolved configuration plus the configured log channels
pub struct App {
    config: Config,
    loggers: LineageLoggers,
}

impl App {
    /// Install logging and prepare the lineage client.
    ///
    /// The application subscriber goes in first so the channel layer rides
    /// along with it; then the channels are configured from the config.
    pub fn start(config: Config, quiet: bool) -> Result<Self> {
        if !quiet {
            let log_config = config
                .log_config()
                .with_color(console::colors_enabled_stderr());
            // Ignore errors if already initialized
            init_tracing_with_config(log_config).ok();
        }

        let loggers = configure_lineage_logging(
            &config.logging.lineage_settings(),
            &config.logging.overrides(),
        )
        .context("Failed to configure OpenLineage logging")?;
        debug!(
            parent = ?loggers.parent.level(),
            client = ?loggers.client.level(),
            "Lineage channels configured"
        );

        let app = App { config, loggers };
        app.prepare_client()?;
        Ok(app)
    }

    /// A file transport needs the client built up front; the console
    /// transport is left to the first injected call.
    fn prepare_client(&self) -> Result<()> {
        if let TransportConfig::File { path } = &self.config.client.transport {
            let transport = Arc::new(FileTransport::open(path)?);
            global().get_or_init_with(&self.config.client.url, |url| {
                OpenLineageClient::with_transport(url, transport)
            })?;
        }
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn loggers(&self) -> &LineageLoggers {
        &self.loggers
    }

    /// Demos running against the process-wide client
    pub fn demos(&self) -> Demos<OpenLineageClient> {
        Demos::new(
            global(),
            InjectOptions {
                url: self.config.client.url.clone(),
                client_param_name: self.config.client.client_param_name.clone(),
            },
            self.config.namespace.clone(),
        )
    }
}
