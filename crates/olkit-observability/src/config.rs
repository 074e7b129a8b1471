//! Configuration for structured logging and the lineage log channels.
//!
//! [`LogConfig`] describes the application-wide subscriber (format, level
//! filter, output). [`LineageLogSettings`] describes the two OpenLineage
//! channels: their threshold, line template and optional log file.

use crate::level::Severity;
use crate::template::DEFAULT_TEMPLATE;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during logging configuration
#[derive(Error, Debug)]
pub enum LogError {
    /// Level is not a known name or number
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    /// Template or format name is not recognised
    #[error("Invalid log format: {0}")]
    InvalidFormat(String),

    /// I/O failure while logging
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// The log file could not be opened
    #[error("Failed to open log file {}: {source}", .path.display())]
    LogFile {
        /// Log file path
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: io::Error,
    },

    /// Subscriber setup failed
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Output format for logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Pretty-printed logs with colors and human-readable formatting
    #[default]
    Pretty,

    /// Compact single-line format
    Compact,

    /// JSON format for machine-readable logs
    Json,
}

impl FromStr for LogFormat {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(LogError::InvalidFormat(format!(
                "Unknown format: {}. Expected one of: pretty, compact, json",
                s
            ))),
        }
    }
}

/// Log output destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogOutput {
    /// Write to standard error
    #[default]
    Stderr,

    /// Write to standard output
    Stdout,
}

/// Configuration for the application-wide subscriber
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Output format for logs
    pub format: LogFormat,

    /// Log level filter (e.g., "info", "debug", "trace")
    /// If None, will be determined from RUST_LOG environment variable
    pub level: Option<String>,

    /// Whether to use colored output (only for Pretty format)
    pub use_color: bool,

    /// Whether to include timestamps in output
    pub use_timestamps: bool,

    /// Whether to include target module names
    pub include_targets: bool,

    /// Output destination (stderr by default)
    pub output: LogOutput,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            format: LogFormat::Pretty,
            level: None,
            use_color: true,
            use_timestamps: true,
            include_targets: true,
            output: LogOutput::Stderr,
        }
    }
}

impl LogConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the log level
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Enable or disable color output
    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    /// Enable or disable timestamps
    pub fn with_timestamps(mut self, use_timestamps: bool) -> Self {
        self.use_timestamps = use_timestamps;
        self
    }

    /// Enable or disable target module names
    pub fn with_targets(mut self, include_targets: bool) -> Self {
        self.include_targets = include_targets;
        self
    }

    /// Set the output destination
    pub fn with_output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    /// Get the effective log level from config or environment
    pub fn get_effective_level(&self) -> String {
        self.level
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| "info".to_string())
    }
}

/// Settings for the `openlineage` and `openlineage.client` channels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineageLogSettings {
    /// Threshold applied to both channels
    pub level: Severity,

    /// Line template; `None` uses [`DEFAULT_TEMPLATE`]
    pub format: Option<String>,

    /// Append records to this file in addition to the console
    pub file: Option<PathBuf>,
}

impl Default for LineageLogSettings {
    fn default() -> Self {
        LineageLogSettings {
            level: Severity::Debug,
            format: None,
            file: None,
        }
    }
}

impl LineageLogSettings {
    /// Settings with the given channel threshold
    pub fn new(level: Severity) -> Self {
        LineageLogSettings {
            level,
            ..Self::default()
        }
    }

    /// Set the threshold from a level name or number
    pub fn with_level_str(mut self, level: &str) -> Result<Self, LogError> {
        self.level = level.parse()?;
        Ok(self)
    }

    /// Use a custom line template
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Also append records to a file
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Template string in effect
    pub fn effective_format(&self) -> &str {
        self.format.as_deref().unwrap_or(DEFAULT_TEMPLATE)
    }
}
