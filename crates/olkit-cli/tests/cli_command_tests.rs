// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 olkit Contributors

//! CLI command integration tests
//!
//! Runs the olkit binary end-to-end:
//! - Command parsing and global flags
//! - Namespace output
//! - Injected client demos with the file transport
//! - Lineage channel log files and the client logging override

use olkit_test_utils::{olkit, OlkitCommand, TestWorkspace};
use predicates::prelude::*;
use tempfile::TempDir;

const INITIALIZED: &str = "openlineage.client - DEBUG - OpenLineage client logging initialized";

#[test]
fn test_cli_no_args() {
    olkit()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help() {
    olkit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("OpenLineage"))
        .stdout(predicate::str::contains("multiply"))
        .stdout(predicate::str::contains("--log-file"));
}

#[test]
fn test_cli_version() {
    olkit()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("olkit"));

    olkit()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("license: AGPL-3.0"));
}

#[test]
fn test_completions() {
    olkit()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("olkit"));
}

// ============================================================================
// Namespace
// ============================================================================

#[test]
fn test_namespace_sanitizes_project() {
    olkit()
        .args(["namespace", "My-Project!", "dev", "--no-hostname"])
        .assert()
        .success()
        .stdout("my_project_.dev\n");
}

#[test]
fn test_namespace_with_prefix() {
    olkit()
        .args([
            "namespace",
            "analytics",
            "staging",
            "--prefix",
            "company",
            "--no-hostname",
        ])
        .assert()
        .success()
        .stdout("company.analytics.staging\n");
}

#[test]
fn test_namespace_appends_short_hostname() {
    let output = olkit()
        .args(["namespace", "analytics", "staging"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let namespace = String::from_utf8(output.stdout).unwrap();
    let segments: Vec<&str> = namespace.trim().split('.').collect();
    assert_eq!(segments.len(), 3);
    assert_eq!(&segments[..2], &["analytics", "staging"]);
    assert!(!segments[2].is_empty());
}

// ============================================================================
// Injected client demos
// ============================================================================

#[test]
fn test_multiply_with_default_client() {
    let temp_dir = TempDir::new().unwrap();
    OlkitCommand::new()
        .in_dir(temp_dir.path())
        .args(&["multiply", "4", "7"])
        .run_success()
        .stdout(predicate::str::contains("Result: 28"));
}

#[test]
fn test_multiply_overflow_fails_cleanly() {
    let temp_dir = TempDir::new().unwrap();
    OlkitCommand::new()
        .in_dir(temp_dir.path())
        .args(&["multiply", "9223372036854775807", "2"])
        .run_failure()
        .stderr(predicate::str::contains("overflows i64"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn test_track_emits_run_events() {
    let ws = TestWorkspace::with_file_transport();
    OlkitCommand::new()
        .in_dir(ws.path())
        .args(&[
            "track",
            "5",
            "8",
            "--prefix",
            "company",
            "--environment",
            "staging",
        ])
        .run_success()
        .stdout(predicate::str::contains("Result: 40"))
        .stdout(predicate::str::contains("company.ol_poc.staging"));

    let events = ws.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["eventType"], "START");
    assert_eq!(events[1]["eventType"], "COMPLETE");
    assert_eq!(events[0]["run"]["runId"], events[1]["run"]["runId"]);
    assert_eq!(events[0]["job"]["namespace"], "company.ol_poc.staging");
    assert_eq!(events[0]["job"]["name"], "internal_function.a5_b8");
    assert_eq!(events[0]["producer"], "manual-example");
}

#[test]
fn test_environment_override_reaches_namespace() {
    let ws = TestWorkspace::with_file_transport();
    OlkitCommand::new()
        .in_dir(ws.path())
        .env("OLKIT_ENVIRONMENT", "qa")
        .args(&["track", "2", "3"])
        .run_success();

    let events = ws.events();
    assert_eq!(events[0]["job"]["namespace"], "ol_poc.qa");
}

#[test]
fn test_dataset_event() {
    let ws = TestWorkspace::with_file_transport();
    OlkitCommand::new()
        .in_dir(ws.path())
        .args(&["dataset-event"])
        .run_success()
        .stdout(predicate::str::contains("ol_poc.uat/first_dataset"));

    let events = ws.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["dataset"]["namespace"], "ol_poc.uat");
    assert_eq!(events[0]["producer"], "sample_producer");
}

#[test]
fn test_datasets_prints_processed_records() {
    let ws = TestWorkspace::with_file_transport();
    let output = OlkitCommand::new()
        .in_dir(ws.path())
        .args(&["datasets", "--prefix", "company", "--environment", "prod"])
        .into_inner()
        .output()
        .unwrap();
    assert!(output.status.success());

    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["value"], "first");
    assert!(records[1]["processed_at"].is_string());

    let events = ws.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["inputs"][0]["name"], "input_data");
    assert_eq!(events[0]["outputs"], serde_json::json!([]));
    let output_dataset = &events[1]["outputs"][0];
    assert_eq!(output_dataset["namespace"], "company.ol_poc.prod");
    assert_eq!(
        output_dataset["facets"]["columnLineage"]["fields"]["name"]["inputFields"][0]["field"],
        "value"
    );
    assert_eq!(output_dataset["facets"]["version"]["datasetVersion"], "2");
}

#[test]
fn test_square_reports_ignored_url() {
    // The file transport binds the client to the configured URL at startup
    let ws = TestWorkspace::with_file_transport();
    OlkitCommand::new()
        .in_dir(ws.path())
        .args(&["square", "5"])
        .run_success()
        .stdout(predicate::str::contains("Result: 25"))
        .stdout(predicate::str::contains("http://custom-server:5000 was ignored"));
}

// ============================================================================
// Lineage channel logging
// ============================================================================

#[test]
fn test_log_file_receives_channel_records() {
    let ws = TestWorkspace::with_file_transport();
    OlkitCommand::new()
        .in_dir(ws.path())
        .args(&["track", "3", "6"])
        .run_success();

    let lines = ws.log_lines();
    assert!(lines.iter().any(|line| line.ends_with(INITIALIZED)));
    assert!(lines
        .iter()
        .any(|line| line.ends_with("openlineage.client - DEBUG - Emitting START event")));
}

#[test]
fn test_client_logging_override_silences_debug() {
    let ws = TestWorkspace::with_file_transport();
    OlkitCommand::new()
        .in_dir(ws.path())
        .env("OPENLINEAGE_CLIENT_LOGGING", "error")
        .args(&["track", "3", "6"])
        .run_success();

    let log = ws.read_file("openlineage.log");
    assert!(!log.contains("DEBUG"));
    // Events are still written
    assert_eq!(ws.events().len(), 2);
}

#[test]
fn test_log_level_flag() {
    let ws = TestWorkspace::with_file_transport();
    OlkitCommand::new()
        .in_dir(ws.path())
        .args(&["--log-level", "INFO", "track", "3", "6"])
        .run_success();

    let log = ws.read_file("openlineage.log");
    assert!(!log.contains(" - DEBUG - "));
    assert!(!log.contains(INITIALIZED));
}

#[test]
fn test_log_format_flag() {
    let ws = TestWorkspace::with_file_transport();
    OlkitCommand::new()
        .in_dir(ws.path())
        .args(&[
            "--log-format",
            "%(levelname)s|%(name)s|%(message)s",
            "multiply",
            "2",
            "2",
        ])
        .run_success();

    assert!(ws
        .log_lines()
        .contains(&"DEBUG|openlineage.client|OpenLineage client logging initialized".to_string()));
}

#[test]
fn test_log_file_appends_across_runs() {
    let ws = TestWorkspace::with_file_transport();
    for _ in 0..2 {
        OlkitCommand::new()
            .in_dir(ws.path())
            .args(&["multiply", "1", "1"])
            .run_success();
    }

    let initialized = ws
        .log_lines()
        .iter()
        .filter(|line| line.ends_with(INITIALIZED))
        .count();
    assert_eq!(initialized, 2);
}

#[test]
fn test_invalid_log_level_rejected() {
    olkit()
        .args(["--log-level", "LOUD", "multiply", "1", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("LOUD"));
}

#[test]
fn test_unopenable_log_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("missing").join("openlineage.log");
    OlkitCommand::new()
        .in_dir(temp_dir.path())
        .args(&["--log-file", log_file.to_str().unwrap(), "multiply", "1", "2"])
        .run_failure()
        .stderr(predicate::str::contains("Failed to configure OpenLineage logging"));
}

#[test]
fn test_explicit_config_file() {
    let ws = TestWorkspace::with_file_transport();
    let elsewhere = TempDir::new().unwrap();
    OlkitCommand::new()
        .in_dir(elsewhere.path())
        .config(&ws.config_path())
        .args(&["dataset-event"])
        .run_success();

    assert_eq!(ws.events().len(), 1);
}

#[test]
fn test_invalid_config_fails() {
    let ws = TestWorkspace::new();
    ws.write_config("[client]\nurl = \"ftp://nowhere\"\n");
    OlkitCommand::new()
        .in_dir(ws.path())
        .args(&["multiply", "1", "2"])
        .run_failure()
        .stderr(predicate::str::contains("client.url"));
}
