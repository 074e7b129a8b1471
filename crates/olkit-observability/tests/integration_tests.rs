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
//! Integration tests for the lineage log channels
//!
//! Each test owns a private `LineageLogging` and installs its layer with a
//! scoped subscriber, so nothing here touches the global default.

use olkit_observability::{
    log_critical, HandlerKind, LineageLogSettings, LineageLogging, LogConfig, LogError, LogFormat,
    LogOutput, LogOverrides, Severity, CLIENT_TARGET, PARENT_TARGET,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

fn with_channels<T>(logging: &LineageLogging, f: impl FnOnce() -> T) -> T {
    let subscriber = Registry::default().with(logging.layer());
    tracing::subscriber::with_default(subscriber, f)
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_reconfigure_does_not_duplicate_handlers() {
    let temp = TempDir::new().unwrap();
    let log_path = temp.path().join("openlineage.log");
    let logging = LineageLogging::new();

    let first = LineageLogSettings::new(Severity::Debug).with_file(&log_path);
    let loggers = logging.configure(&first, &LogOverrides::none()).unwrap();
    assert_eq!(loggers.parent.handler_count(), 2);
    assert_eq!(loggers.client.handler_count(), 2);

    let second = LineageLogSettings::new(Severity::Warning).with_file(&log_path);
    let loggers = logging.configure(&second, &LogOverrides::none()).unwrap();
    assert_eq!(loggers.parent.handler_count(), 2);
    assert_eq!(loggers.client.handler_count(), 2);
    assert_eq!(loggers.parent.level(), Some(Severity::Warning));
    assert_eq!(loggers.client.level(), Some(Severity::Warning));
    assert_eq!(
        loggers.client.handler_kinds(),
        vec![HandlerKind::File(log_path.clone()), HandlerKind::Console]
    );
}

#[test]
fn test_reconfigure_without_file_drops_file_handler() {
    let temp = TempDir::new().unwrap();
    let logging = LineageLogging::new();

    logging
        .configure(
            &LineageLogSettings::new(Severity::Debug).with_file(temp.path().join("a.log")),
            &LogOverrides::none(),
        )
        .unwrap();
    let loggers = logging
        .configure(&LineageLogSettings::new(Severity::Info), &LogOverrides::none())
        .unwrap();

    assert_eq!(loggers.parent.handler_kinds(), vec![HandlerKind::Console]);
    assert_eq!(loggers.client.handler_kinds(), vec![HandlerKind::Console]);
}

#[test]
fn test_env_override_sets_client_level_only() {
    let logging = LineageLogging::new();
    let overrides = LogOverrides::none().with_client_logging("ERROR");

    let loggers = logging
        .configure(&LineageLogSettings::new(Severity::Debug), &overrides)
        .unwrap();

    assert_eq!(loggers.client.level(), Some(Severity::Error));
    assert_eq!(loggers.parent.level(), Some(Severity::Debug));
}

#[test]
fn test_env_override_is_case_insensitive_and_ignores_unknown_values() {
    let logging = LineageLogging::new();

    let loggers = logging
        .configure(
            &LineageLogSettings::new(Severity::Info),
            &LogOverrides::none().with_client_logging("critical"),
        )
        .unwrap();
    assert_eq!(loggers.client.level(), Some(Severity::Critical));

    let loggers = logging
        .configure(
            &LineageLogSettings::new(Severity::Info),
            &LogOverrides::none().with_client_logging("chatty"),
        )
        .unwrap();
    assert_eq!(loggers.client.level(), Some(Severity::Info));
}

#[test]
fn test_records_are_written_once_to_shared_file() {
    let temp = TempDir::new().unwrap();
    let log_path = temp.path().join("openlineage.log");
    let logging = LineageLogging::new();
    let settings = LineageLogSettings::new(Severity::Debug)
        .with_format("{name}|{levelname}|{message}")
        .with_file(&log_path);

    with_channels(&logging, || {
        logging.configure(&settings, &LogOverrides::none()).unwrap();
        tracing::debug!(target: CLIENT_TARGET, "Emitting START event");
        tracing::info!(target: "openlineage::client::transport", run_id = "r-1", "sent");
        tracing::info!(target: PARENT_TARGET, "parent record");
        tracing::info!(target: "unrelated", "not a channel");
    });

    let lines = read_lines(&log_path);
    assert_eq!(
        lines,
        vec![
            "openlineage.client|DEBUG|OpenLineage client logging initialized".to_string(),
            "openlineage.client|DEBUG|Emitting START event".to_string(),
            "openlineage.client.transport|INFO|sent run_id=r-1".to_string(),
            "openlineage|INFO|parent record".to_string(),
        ]
    );
}

#[test]
fn test_client_threshold_filters_but_parent_keeps_its_level() {
    let temp = TempDir::new().unwrap();
    let log_path = temp.path().join("filtered.log");
    let logging = LineageLogging::new();
    let settings = LineageLogSettings::new(Severity::Debug)
        .with_format("%(name)s %(levelname)s %(message)s")
        .with_file(&log_path);

    with_channels(&logging, || {
        logging
            .configure(&settings, &LogOverrides::none().with_client_logging("error"))
            .unwrap();
        tracing::debug!(target: CLIENT_TARGET, "dropped");
        tracing::warn!(target: CLIENT_TARGET, "also dropped");
        tracing::error!(target: CLIENT_TARGET, "kept");
        tracing::debug!(target: PARENT_TARGET, "parent debug");
    });

    let lines = read_lines(&log_path);
    assert_eq!(
        lines,
        vec![
            "openlineage.client ERROR kept".to_string(),
            "openlineage DEBUG parent debug".to_string(),
        ]
    );
}

#[test]
fn test_critical_records() {
    let temp = TempDir::new().unwrap();
    let log_path = temp.path().join("critical.log");
    let logging = LineageLogging::new();
    let settings = LineageLogSettings::new(Severity::Critical)
        .with_format("{levelno} {levelname} {message}")
        .with_file(&log_path);

    with_channels(&logging, || {
        logging.configure(&settings, &LogOverrides::none()).unwrap();
        tracing::error!(target: CLIENT_TARGET, "plain error");
        log_critical!(target: CLIENT_TARGET, "transport unusable");
    });

    assert_eq!(
        read_lines(&log_path),
        vec!["50 CRITICAL transport unusable".to_string()]
    );
}

#[test]
fn test_file_is_appended_across_configurations() {
    let temp = TempDir::new().unwrap();
    let log_path = temp.path().join("append.log");
    fs::write(&log_path, "existing line\n").unwrap();

    let logging = LineageLogging::new();
    let settings = LineageLogSettings::new(Severity::Info)
        .with_format("{message}")
        .with_file(&log_path);

    with_channels(&logging, || {
        logging.configure(&settings, &LogOverrides::none()).unwrap();
        tracing::info!(target: CLIENT_TARGET, "first");
        logging.configure(&settings, &LogOverrides::none()).unwrap();
        tracing::info!(target: CLIENT_TARGET, "second");
    });

    assert_eq!(
        read_lines(&log_path),
        vec![
            "existing line".to_string(),
            "first".to_string(),
            "second".to_string()
        ]
    );
}

#[test]
fn test_handle_log_writes_directly() {
    let temp = TempDir::new().unwrap();
    let log_path = temp.path().join("direct.log");
    let logging = LineageLogging::new();
    let loggers = logging
        .configure(
            &LineageLogSettings::new(Severity::Info)
                .with_format("{name}: {message}")
                .with_file(&log_path),
            &LogOverrides::none(),
        )
        .unwrap();

    loggers.client.log(Severity::Debug, "below threshold");
    loggers.client.log(Severity::Info, "via handle");
    loggers.parent.set_level(Severity::Error);
    loggers.parent.log(Severity::Warning, "suppressed");

    assert_eq!(
        read_lines(&log_path),
        vec!["openlineage.client: via handle".to_string()]
    );
}

#[test]
fn test_unopenable_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let missing_dir = temp.path().join("missing").join("openlineage.log");
    let logging = LineageLogging::new();

    let result = logging.configure(
        &LineageLogSettings::new(Severity::Debug).with_file(&missing_dir),
        &LogOverrides::none(),
    );
    assert!(matches!(result, Err(LogError::LogFile { .. })));
}

// Configuration building tests - these don't require global initialization

#[test]
fn test_config_builder_chaining() {
    let config = LogConfig::new()
        .with_format(LogFormat::Json)
        .with_level("debug")
        .with_timestamps(false)
        .with_color(false)
        .with_targets(false)
        .with_output(LogOutput::Stdout);

    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.level, Some("debug".to_string()));
    assert!(!config.use_timestamps);
    assert!(!config.use_color);
    assert!(!config.include_targets);
    assert_eq!(config.output, LogOutput::Stdout);
}

#[test]
fn test_explicit_level_overrides_env() {
    std::env::set_var("RUST_LOG", "trace");
    let config = LogConfig::new()
        .with_format(LogFormat::Compact)
        .with_level("warn");
    assert_eq!(config.get_effective_level(), "warn");
}
