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
use crate::error::{ConfigError, ConfigResult};
use crate::schema::Config;
use crate::validation::Validator;
use olkit_observability::{Severity, CLIENT_LOGGING_ENV};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Configuration format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.yaml` or `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("json") => Ok(ConfigFormat::Json),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::InvalidPath(path.to_path_buf())),
        }
    }

    /// Get format name as string
    pub fn name(&self) -> &'static str {
        match self {
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Yaml => "YAML",
            ConfigFormat::Json => "JSON",
        }
    }
}

/// Configuration loader
pub struct ConfigLoader {
    validate: bool,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        ConfigLoader { validate: true }
    }

    /// Create a loader without validation
    pub fn without_validation() -> Self {
        ConfigLoader { validate: false }
    }

    /// Load configuration from a file
    pub async fn load_file<P: AsRef<Path>>(&self, path: P) -> ConfigResult<Config> {
        let path = path.as_ref();
        debug!("Loading configuration from: {}", path.display());

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).await?;
        let format = ConfigFormat::from_path(path)?;

        info!(
            "Loaded {} configuration file: {}",
            format.name(),
            path.display()
        );

        self.load_from_string(&content, format)
    }

    /// Load configuration from a string
    pub fn load_from_string(&self, content: &str, format: ConfigFormat) -> ConfigResult<Config> {
        let config = match format {
            ConfigFormat::Toml => self.parse_toml(content)?,
            ConfigFormat::Yaml => self.parse_yaml(content)?,
            ConfigFormat::Json => self.parse_json(content)?,
        };

        debug!("Configuration loaded from {}", format.name());

        if self.validate {
            config.validate()?;
            info!("Configuration validated successfully");
        }

        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub async fn load_with_overrides<P: AsRef<Path>>(&self, path: P) -> ConfigResult<Config> {
        let mut config = self.load_file(path).await?;
        self.apply_env_overrides(&mut config)?;
        Ok(config)
    }

    /// Parse TOML configuration
    fn parse_toml(&self, content: &str) -> ConfigResult<Config> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Parse YAML configuration
    fn parse_yaml(&self, content: &str) -> ConfigResult<Config> {
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Parse JSON configuration
    fn parse_json(&self, content: &str) -> ConfigResult<Config> {
        let config: Config = serde_json::from_str(content)?;
        Ok(config)
    }

    /// Apply environment variable overrides from the process environment
    pub fn apply_env_overrides(&self, config: &mut Config) -> ConfigResult<()> {
        self.apply_overrides_from(config, |name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable source.
    ///
    /// `OPENLINEAGE_CLIENT_LOGGING` is captured verbatim; the logging
    /// configurator decides whether it names a level.
    pub fn apply_overrides_from<F>(&self, config: &mut Config, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Client settings
        if let Some(value) = lookup("OLKIT_URL") {
            config.client.url = value;
        }
        if let Some(value) = lookup("OLKIT_CLIENT_PARAM") {
            config.client.client_param_name = value;
        }

        // Logging settings
        if let Some(value) = lookup("OLKIT_LOG_LEVEL") {
            config.logging.level = value.parse::<Severity>().map_err(|_| {
                ConfigError::env_var_parsing_error(
                    "OLKIT_LOG_LEVEL",
                    &value,
                    "expected DEBUG, INFO, WARNING, ERROR, CRITICAL or 10-50",
                )
            })?;
        }
        if let Some(value) = lookup("OLKIT_LOG_FORMAT") {
            config.logging.format = Some(value);
        }
        if let Some(value) = lookup("OLKIT_LOG_FILE") {
            config.logging.file = Some(PathBuf::from(value));
        }
        config.logging.client_override = lookup(CLIENT_LOGGING_ENV);

        // Namespace settings
        if let Some(value) = lookup("OLKIT_PROJECT") {
            config.namespace.project = value;
        }
        if let Some(value) = lookup("OLKIT_ENVIRONMENT") {
            config.namespace.environment = value;
        }
        if let Some(value) = lookup("OLKIT_PREFIX") {
            config.namespace.prefix = Some(value).filter(|prefix| !prefix.is_empty());
        }
        if let Some(value) = lookup("OLKIT_INCLUDE_HOSTNAME") {
            config.namespace.include_hostname = parse_bool("OLKIT_INCLUDE_HOSTNAME", &value)?;
        }

        if self.validate {
            config.validate()?;
        }

        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse boolean from string (accepts: true, false, yes, no, 1, 0, on, off)
fn parse_bool(variable_name: &str, value: &str) -> ConfigResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(ConfigError::env_var_parsing_error(
            variable_name,
            value,
            "expected 'true', 'false', 'yes', 'no', '1', '0', 'on', or 'off'",
        )),
    }
}
