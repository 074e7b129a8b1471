use crate::error::{ConfigError, ConfigResult};
use crate::schema::*;
use olkit_observability::{LogFormat, LogTemplate};
use url::Url;

/// Validator for configuration settings
pub trait Validator {
    fn validate(&self) -> ConfigResult<()>;
}

impl Validator for Config {
    fn validate(&self) -> ConfigResult<()> {
        self.client.validate()?;
        self.logging.validate()?;
        self.namespace.validate()?;
        Ok(())
    }
}

impl Validator for ClientConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.url.is_empty() {
            return Err(ConfigError::MissingRequired("client.url".to_string()));
        }

        let url = Url::parse(&self.url)
            .map_err(|e| ConfigError::invalid_value("client.url", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::invalid_value(
                "client.url",
                format!("scheme must be http or https, got {}", url.scheme()),
            ));
        }

        if !is_identifier(&self.client_param_name) {
            return Err(ConfigError::invalid_value(
                "client.client_param_name",
                format!(
                    "must be a non-empty identifier, got '{}'",
                    self.client_param_name
                ),
            ));
        }

        if let TransportConfig::File { path } = &self.transport {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::MissingRequired(
                    "client.transport.path".to_string(),
                ));
            }
        }

        Ok(())
    }
}

impl Validator for LoggingConfig {
    fn validate(&self) -> ConfigResult<()> {
        if let Some(format) = &self.format {
            LogTemplate::parse(format)
                .map_err(|e| ConfigError::invalid_value("logging.format", e.to_string()))?;
        }

        self.app_format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::invalid_value("logging.app_format", e.to_string()))?;

        if self.app_level.trim().is_empty() {
            return Err(ConfigError::MissingRequired("logging.app_level".to_string()));
        }

        Ok(())
    }
}

impl Validator for NamespaceConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.project.trim().is_empty() {
            return Err(ConfigError::MissingRequired("namespace.project".to_string()));
        }

        if self.environment.trim().is_empty() {
            return Err(ConfigError::MissingRequired(
                "namespace.environment".to_string(),
            ));
        }

        Ok(())
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
