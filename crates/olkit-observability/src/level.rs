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
//! Severity levels for the lineage log channels.
//!
//! Levels carry the conventional numeric weights (`DEBUG = 10` through
//! `CRITICAL = 50`) so thresholds can be given either by name or by number.

use crate::config::LogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::Level;

/// Name of the environment variable that overrides the client channel level.
pub const CLIENT_LOGGING_ENV: &str = "OPENLINEAGE_CLIENT_LOGGING";

/// Severity of a log record or threshold of a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Severity {
    /// Finer than debug; only produced by `tracing::trace!`
    Trace,
    /// DEBUG (10)
    Debug,
    /// INFO (20)
    Info,
    /// WARNING (30)
    Warning,
    /// ERROR (40)
    Error,
    /// Only produced by events tagged `critical = true`
    Critical,
}

impl Severity {
    /// The five standard severities, lowest first
    pub const STANDARD: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
    ];

    /// Numeric weight of this severity
    pub fn as_number(self) -> u8 {
        match self {
            Severity::Trace => 5,
            Severity::Debug => 10,
            Severity::Info => 20,
            Severity::Warning => 30,
            Severity::Error => 40,
            Severity::Critical => 50,
        }
    }

    /// Upper-case display name
    pub fn name(self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }

    /// Map a numeric weight back to a severity. Only exact weights are accepted.
    pub fn from_number(value: u8) -> Result<Self, LogError> {
        match value {
            5 => Ok(Severity::Trace),
            10 => Ok(Severity::Debug),
            20 => Ok(Severity::Info),
            30 => Ok(Severity::Warning),
            40 => Ok(Severity::Error),
            50 => Ok(Severity::Critical),
            other => Err(LogError::InvalidLogLevel(format!(
                "{}. Expected one of: 10, 20, 30, 40, 50",
                other
            ))),
        }
    }

    /// Match one of the five standard names, case-insensitively.
    ///
    /// Used for the environment override, which ignores anything else.
    pub fn from_standard_name(name: &str) -> Option<Self> {
        let upper = name.trim().to_uppercase();
        Severity::STANDARD
            .into_iter()
            .find(|severity| severity.name() == upper)
    }

    /// Severity of a `tracing` event level
    pub fn from_tracing(level: &Level) -> Self {
        if *level == Level::ERROR {
            Severity::Error
        } else if *level == Level::WARN {
            Severity::Warning
        } else if *level == Level::INFO {
            Severity::Info
        } else if *level == Level::DEBUG {
            Severity::Debug
        } else {
            Severity::Trace
        }
    }

    /// Whether a record of `record` severity passes a channel set to `self`
    pub fn admits(self, record: Severity) -> bool {
        record >= self
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Severity {
    type Err = LogError;

    /// Parse a level given by name (any case, `WARN` accepted) or by number
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(number) = trimmed.parse::<u8>() {
            return Severity::from_number(number);
        }
        match trimmed.to_uppercase().as_str() {
            "TRACE" => Ok(Severity::Trace),
            "DEBUG" => Ok(Severity::Debug),
            "INFO" => Ok(Severity::Info),
            "WARNING" | "WARN" => Ok(Severity::Warning),
            "ERROR" => Ok(Severity::Error),
            "CRITICAL" | "FATAL" => Ok(Severity::Critical),
            _ => Err(LogError::InvalidLogLevel(format!(
                "{}. Expected one of: DEBUG, INFO, WARNING, ERROR, CRITICAL",
                trimmed
            ))),
        }
    }
}

impl TryFrom<String> for Severity {
    type Error = LogError;

    fn try_from(value: String) -> Result<Self, LogError> {
        value.parse()
    }
}

impl From<Severity> for String {
    fn from(value: Severity) -> Self {
        value.name().to_string()
    }
}

/// Overrides captured from the process environment once at startup.
///
/// The configurator never reads the environment itself; callers build this
/// value with [`LogOverrides::from_env`] (or by hand in tests) and pass it in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogOverrides {
    /// Raw value of `OPENLINEAGE_CLIENT_LOGGING`, if it was set
    pub client_logging: Option<String>,
}

impl LogOverrides {
    /// No overrides
    pub fn none() -> Self {
        Self::default()
    }

    /// Capture overrides from the current environment
    pub fn from_env() -> Self {
        LogOverrides {
            client_logging: std::env::var(CLIENT_LOGGING_ENV).ok(),
        }
    }

    /// Set the client channel override
    pub fn with_client_logging(mut self, value: impl Into<String>) -> Self {
        self.client_logging = Some(value.into());
        self
    }

    /// Client channel level requested by the override, if it names a standard severity
    pub fn client_level(&self) -> Option<Severity> {
        self.client_logging
            .as_deref()
            .filter(|raw| !raw.is_empty())
            .and_then(Severity::from_standard_name)
    }
}
