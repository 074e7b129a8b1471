//! olkit Observability Module
//!
//! Structured logging for olkit, plus the two OpenLineage log channels
//! (`openlineage` and `openlineage.client`).
//!
//! # Features
//!
//! - **Multiple Output Formats**: Pretty, JSON, and compact output formats
//! - **Environment-based Filtering**: Dynamic log level control via `RUST_LOG`
//! - **Lineage Channels**: console and file handlers with line templates,
//!   idempotent reconfiguration, and an `OPENLINEAGE_CLIENT_LOGGING` override
//!
//! # Example
//!
//! ```ignore
//! use olkit_observability::{
//!     configure_lineage_logging, init_tracing, LineageLogSettings, LogFormat, LogOverrides,
//!     Severity,
//! };
//!
//! init_tracing(LogFormat::Pretty, None)?;
//! let loggers = configure_lineage_logging(
//!     &LineageLogSettings::new(Severity::Debug).with_file("openlineage.log"),
//!     &LogOverrides::from_env(),
//! )?;
//! olkit_observability::lineage_debug!("client channel at {:?}", loggers.client.level());
//! ```

pub mod channel;
pub mod config;
pub mod initialization;
pub mod level;
pub mod macros;
pub mod template;

pub use channel::{
    configure_lineage_logging, global, ChannelHandle, ChannelId, ChannelLayer, HandlerKind,
    LineageLoggers, LineageLogging, CLIENT_CHANNEL, CLIENT_TARGET, PARENT_CHANNEL, PARENT_TARGET,
};
pub use config::{LineageLogSettings, LogConfig, LogError, LogFormat, LogOutput};
pub use initialization::{init_tracing, init_tracing_with_config};
pub use level::{LogOverrides, Severity, CLIENT_LOGGING_ENV};
pub use template::{LogTemplate, DEFAULT_TEMPLATE};

/// Re-exported for the `lineage_*` macros
pub use tracing;
