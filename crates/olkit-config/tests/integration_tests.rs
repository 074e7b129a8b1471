use olkit_config::{Config, ConfigError, ConfigFormat, ConfigLoader, TransportConfig, Validator};
use olkit_observability::Severity;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[tokio::test]
async fn test_load_toml_config() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("olkit.toml");
    fs::write(
        &path,
        r#"
[client]
url = "http://custom-server:5000"
client_param_name = "lineage_client"

[client.transport]
type = "file"
path = "events.jsonl"

[logging]
level = "info"
format = "%(asctime)s %(name)s %(message)s"
file = "openlineage.log"

[namespace]
project = "Data Pipeline"
environment = "prod"
prefix = "company"
include_hostname = false
"#,
    )
    .unwrap();

    let config = ConfigLoader::new().load_file(&path).await.unwrap();
    assert_eq!(config.client.url, "http://custom-server:5000");
    assert_eq!(config.client.client_param_name, "lineage_client");
    assert_eq!(
        config.client.transport,
        TransportConfig::File {
            path: PathBuf::from("events.jsonl")
        }
    );
    assert_eq!(config.logging.level, Severity::Info);
    assert_eq!(config.logging.file, Some(PathBuf::from("openlineage.log")));
    assert_eq!(config.namespace.prefix.as_deref(), Some("company"));
    assert!(!config.namespace.include_hostname);
}

#[tokio::test]
async fn test_load_yaml_config() {
    let loader = ConfigLoader::new();
    let yaml_content = r#"
client:
  url: http://localhost:5000
logging:
  level: "30"
namespace:
  project: analytics
  environment: staging
"#;

    let config = loader
        .load_from_string(yaml_content, ConfigFormat::Yaml)
        .unwrap();
    assert_eq!(config.logging.level, Severity::Warning);
    assert_eq!(config.namespace.environment, "staging");
    assert_eq!(config.client.client_param_name, "ol_client");
}

#[tokio::test]
async fn test_load_json_config() {
    let loader = ConfigLoader::new();
    let json_content = r#"
{
  "client": { "url": "https://lineage.example.com/api" },
  "logging": { "level": "ERROR", "app_format": "json" }
}
"#;

    let config = loader
        .load_from_string(json_content, ConfigFormat::Json)
        .unwrap();
    assert_eq!(config.client.url, "https://lineage.example.com/api");
    assert_eq!(config.logging.level, Severity::Error);
    assert_eq!(config.logging.app_format, "json");
}

#[tokio::test]
async fn test_missing_file() {
    let temp = TempDir::new().unwrap();
    let result = ConfigLoader::new()
        .load_file(temp.path().join("absent.toml"))
        .await;
    assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
}

#[tokio::test]
async fn test_unknown_level_rejected_at_parse_time() {
    let loader = ConfigLoader::new();
    let result = loader.load_from_string("[logging]\nlevel = \"loud\"\n", ConfigFormat::Toml);
    assert!(matches!(result, Err(ConfigError::TomlParseError(_))));
}

#[tokio::test]
async fn test_invalid_url_rejected() {
    let loader = ConfigLoader::new();
    let result = loader.load_from_string("[client]\nurl = \"localhost\"\n", ConfigFormat::Toml);
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[tokio::test]
async fn test_directory_without_file_uses_defaults() {
    let temp = TempDir::new().unwrap();
    let config = Config::load(temp.path()).await.unwrap();
    assert_eq!(config.namespace.project, "ol_poc");
    assert!(config.validate().is_ok());
}
