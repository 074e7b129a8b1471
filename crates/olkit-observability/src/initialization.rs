// Copyright (C) 2026  winnyboy5
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//! Logging initialization and setup.
//!
//! The global subscriber is a [`Registry`] with two layers:
//!
//! - the application's `fmt` layer, filtered by `RUST_LOG`/the configured
//!   level, which also receives lineage channel events that propagate;
//! - the [`ChannelLayer`](crate::channel::ChannelLayer) of the process-wide
//!   [`LineageLogging`], which owns the `openlineage` channels.
//!
//! Call [`init_tracing`] (or [`init_tracing_with_config`]) before
//! [`configure_lineage_logging`](crate::configure_lineage_logging); the global
//! default subscriber can only be set once per process.

use crate::channel::{self, ChannelId, LineageLogging};
use crate::config::{LogConfig, LogError, LogFormat, LogOutput};
use std::io;
use tracing_subscriber::filter::{filter_fn, FilterExt};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::{Filter, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

/// Initialize tracing with the specified format and optional log level.
///
/// This is a convenience function that uses default configuration except
/// for the format and log level.
///
/// # Example
///
/// ```ignore
/// use olkit_observability::{init_tracing, LogFormat};
///
/// init_tracing(LogFormat::Pretty, Some("debug")).unwrap();
/// tracing::info!("Application started");
/// ```
pub fn init_tracing(format: LogFormat, level: Option<&str>) -> Result<(), LogError> {
    let config = LogConfig::new()
        .with_format(format)
        .with_level(level.unwrap_or("info"));
    init_tracing_with_config(config)
}

/// Initialize tracing with a detailed configuration.
///
/// The lineage channel layer is always composed in, so channels configured
/// later through [`configure_lineage_logging`](crate::configure_lineage_logging)
/// produce output without further setup.
pub fn init_tracing_with_config(config: LogConfig) -> Result<(), LogError> {
    let channels = channel::global().clone();
    let root_filter = build_root_filter(&config, channels.clone())?;

    Registry::default()
        .with(build_fmt_layer(&config).with_filter(root_filter))
        .with(channels.layer())
        .try_init()
        .map_err(|e| LogError::ConfigError(format!("Failed to install subscriber: {}", e)))
}

/// Install a subscriber carrying only the channel layer, unless one is already set
pub(crate) fn ensure_channel_subscriber() {
    // Already-installed subscribers win; they are expected to include the layer
    let _ = Registry::default()
        .with(channel::global().layer())
        .try_init();
}

fn build_fmt_layer(config: &LogConfig) -> Box<dyn Layer<Registry> + Send + Sync> {
    let writer = get_writer(&config.output);

    match config.format {
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .with_writer(writer)
                .with_target(config.include_targets)
                .with_thread_names(true)
                .with_span_events(FmtSpan::ACTIVE)
                .with_ansi(config.use_color)
                .pretty();

            if config.use_timestamps {
                layer.with_timer(fmt::time::SystemTime).boxed()
            } else {
                layer.without_time().boxed()
            }
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .with_writer(writer)
                .with_target(config.include_targets)
                .with_thread_names(false)
                .with_span_events(FmtSpan::CLOSE)
                .with_ansi(config.use_color)
                .compact();

            if config.use_timestamps {
                layer.with_timer(fmt::time::SystemTime).boxed()
            } else {
                layer.without_time().boxed()
            }
        }
        LogFormat::Json => {
            let layer = fmt::layer()
                .with_writer(writer)
                .json()
                .with_target(config.include_targets)
                .with_thread_names(true)
                .with_span_events(FmtSpan::FULL);

            if config.use_timestamps {
                layer.with_timer(fmt::time::SystemTime).boxed()
            } else {
                layer.without_time().boxed()
            }
        }
    }
}

/// Get the writer for the specified output
fn get_writer(output: &LogOutput) -> fn() -> Box<dyn io::Write + Send> {
    match output {
        LogOutput::Stderr => || Box::new(io::stderr()),
        LogOutput::Stdout => || Box::new(io::stdout()),
    }
}

/// Build an environment filter for the given configuration
fn build_env_filter(config: &LogConfig) -> Result<EnvFilter, LogError> {
    let level_str = config.get_effective_level();

    EnvFilter::try_new(&level_str).map_err(|e| {
        LogError::ConfigError(format!("Failed to parse log filter '{}': {}", level_str, e))
    })
}

/// Filter for the application layer.
///
/// Channel events bypass the level filter: they reach the application output
/// exactly when they pass their channel's threshold and the channel propagates.
fn build_root_filter(
    config: &LogConfig,
    channels: LineageLogging,
) -> Result<impl Filter<Registry>, LogError> {
    let env_filter = build_env_filter(config)?;
    let outside_channels = filter_fn(|metadata| ChannelId::for_target(metadata.target()).is_none());
    let propagated = filter_fn(move |metadata| channels.propagates_to_root(metadata));

    Ok(env_filter.and(outside_channels).or(propagated))
}
