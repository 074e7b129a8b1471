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
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the lineage client, its singleton and the injection wrapper
#[derive(Error, Debug)]
pub enum ClientError {
    /// The singleton was read before any construction happened
    #[error("OpenLineage client has not been initialized")]
    NotInitialized,

    /// The endpoint URL could not be used
    #[error("Invalid OpenLineage URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected URL
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// A named slot in the call context holds no client
    #[error("No lineage client in slot '{0}'")]
    MissingClient(String),

    /// The file transport could not be opened
    #[error("Failed to open transport file {path}: {source}")]
    TransportFile {
        /// Transport file path
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },

    /// Writing an event failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An event could not be serialized
    #[error("Failed to serialize event: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Create an invalid URL error
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        ClientError::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
