pub use olkit_client::{DEFAULT_CLIENT_PARAM, DEFAULT_URL};
use olkit_observability::{LineageLogSettings, LogConfig, LogOverrides, Severity};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration structure.
///
/// Loaded once at startup and treated as immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    /// Lineage client settings
    pub client: ClientConfig,

    /// Application and lineage channel logging
    pub logging: LoggingConfig,

    /// Namespace components used by the demos
    pub namespace: NamespaceConfig,
}

impl Config {
    /// Subscriber configuration for the application output
    pub fn log_config(&self) -> LogConfig {
        let format = self.logging.app_format.parse().unwrap_or_default();
        LogConfig::new()
            .with_format(format)
            .with_level(self.logging.app_level.clone())
    }

    /// Load `olkit.toml` from a directory, falling back to defaults when absent
    pub async fn load(dir: impl AsRef<std::path::Path>) -> crate::ConfigResult<Self> {
        use crate::ConfigLoader;
        let config_path = dir.as_ref().join("olkit.toml");

        let loader = ConfigLoader::new();
        if !config_path.exists() {
            let mut config = Self::default();
            loader.apply_env_overrides(&mut config)?;
            return Ok(config);
        }

        loader.load_with_overrides(&config_path).await
    }
}

/// Lineage client settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    /// OpenLineage endpoint; only the first construction's URL takes effect
    #[serde(default = "default_url")]
    pub url: String,

    /// Slot name under which the client is injected
    #[serde(default = "default_client_param")]
    pub client_param_name: String,

    /// Where emitted events go
    #[serde(default)]
    pub transport: TransportConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            url: default_url(),
            client_param_name: default_client_param(),
            transport: TransportConfig::default(),
        }
    }
}

/// Event destination
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Log events as JSON on the client channel
    #[default]
    Console,

    /// Append events as JSON lines to a file
    File {
        /// Events file, created when missing
        path: PathBuf,
    },
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Threshold for the `openlineage` channels
    #[serde(default = "default_channel_level")]
    pub level: Severity,

    /// Line template for the channels
    #[serde(default)]
    pub format: Option<String>,

    /// Optional log file for the channels
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// `EnvFilter` directive for application output
    #[serde(default = "default_app_level")]
    pub app_level: String,

    /// Application output format (pretty, compact, json)
    #[serde(default = "default_app_format")]
    pub app_format: String,

    /// Raw `OPENLINEAGE_CLIENT_LOGGING` value captured at load time
    #[serde(skip)]
    pub client_override: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_channel_level(),
            format: None,
            file: None,
            app_level: default_app_level(),
            app_format: default_app_format(),
            client_override: None,
        }
    }
}

impl LoggingConfig {
    /// Channel settings for the logging configurator
    pub fn lineage_settings(&self) -> LineageLogSettings {
        LineageLogSettings {
            level: self.level,
            format: self.format.clone(),
            file: self.file.clone(),
        }
    }

    /// Overrides captured at load time
    pub fn overrides(&self) -> LogOverrides {
        LogOverrides {
            client_logging: self.client_override.clone(),
        }
    }
}

/// Namespace components
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NamespaceConfig {
    /// Project name; sanitized when the namespace is built
    #[serde(default = "default_project")]
    pub project: String,

    /// Environment label (dev, staging, prod, ...)
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Optional organizational prefix
    #[serde(default)]
    pub prefix: Option<String>,

    /// Append the short hostname
    #[serde(default = "default_true")]
    pub include_hostname: bool,
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        NamespaceConfig {
            project: default_project(),
            environment: default_environment(),
            prefix: None,
            include_hostname: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

fn default_client_param() -> String {
    DEFAULT_CLIENT_PARAM.to_string()
}

fn default_channel_level() -> Severity {
    Severity::Debug
}

fn default_app_level() -> String {
    "info".to_string()
}

fn default_app_format() -> String {
    "pretty".to_string()
}

fn default_project() -> String {
    "ol_poc".to_string()
}

fn default_environment() -> String {
    "dev".to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use olkit_observability::LogFormat;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.client.url, DEFAULT_URL);
        assert_eq!(config.client.client_param_name, "ol_client");
        assert_eq!(config.client.transport, TransportConfig::Console);
        assert_eq!(config.logging.level, Severity::Debug);
        assert_eq!(config.namespace.project, "ol_poc");
        assert!(config.namespace.include_hostname);
    }

    #[test]
    fn test_transport_tagging() {
        let transport: TransportConfig =
            serde_json::from_str(r#"{"type": "file", "path": "/tmp/events.jsonl"}"#).unwrap();
        assert_eq!(
            transport,
            TransportConfig::File {
                path: PathBuf::from("/tmp/events.jsonl")
            }
        );
    }

    #[test]
    fn test_log_config_falls_back_to_pretty() {
        let mut config = Config::default();
        config.logging.app_format = "fancy".to_string();
        assert_eq!(config.log_config().format, LogFormat::Pretty);

        config.logging.app_format = "json".to_string();
        assert_eq!(config.log_config().format, LogFormat::Json);
    }

    #[test]
    fn test_lineage_settings_carry_over() {
        let mut config = Config::default();
        config.logging.level = Severity::Info;
        config.logging.file = Some(PathBuf::from("openlineage.log"));
        config.logging.client_override = Some("error".to_string());

        let settings = config.logging.lineage_settings();
        assert_eq!(settings.level, Severity::Info);
        assert_eq!(settings.file, Some(PathBuf::from("openlineage.log")));
        assert_eq!(config.logging.overrides().client_level(), Some(Severity::Error));
    }
}
