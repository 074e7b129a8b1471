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
//! Startup configuration for olkit
//!
//! Configuration is read once, at startup, from an optional file plus
//! environment variables, and then handed around as an immutable [`Config`].
//! Nothing downstream reads the environment on its own.
//!
//! # Features
//!
//! - Multi-format configuration support (TOML, YAML, JSON)
//! - Environment variable overrides with `OLKIT_` prefix
//! - Capture of `OPENLINEAGE_CLIENT_LOGGING` for the lineage log channels
//! - Validation with detailed error messages
//!
//! # Example
//!
//! ```no_run
//! use olkit_config::ConfigLoader;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let loader = ConfigLoader::new();
//!     let config = loader.load_with_overrides("olkit.toml").await?;
//!
//!     println!("Emitting lineage to: {}", config.client.url);
//!     println!("Namespace project: {}", config.namespace.project);
//!
//!     Ok(())
//! }
//! ```

/// Error type and result alias
pub mod error;
/// File and environment loading
pub mod loader;
/// Configuration structures and defaults
pub mod schema;
/// Semantic checks on loaded configuration
pub mod validation;

// Re-export commonly used items
pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigFormat, ConfigLoader};
pub use schema::*;
pub use validation::Validator;
