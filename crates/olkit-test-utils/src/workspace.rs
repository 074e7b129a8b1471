// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 olkit Contributors

//! Temporary directory holding a config file plus the log and event files
//! a run writes.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Config file name the CLI picks up from its working directory
pub const CONFIG_FILE: &str = "olkit.toml";

/// A scratch directory with automatic cleanup.
///
/// # Example
/// ```ignore
/// use olkit_test_utils::{OlkitCommand, TestWorkspace};
///
/// let ws = TestWorkspace::with_file_transport();
/// OlkitCommand::new().in_dir(ws.path()).args(&["track", "3", "6"]).run_success();
/// assert_eq!(ws.events().len(), 2);
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// An empty workspace.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// A workspace whose config sends events to `events.jsonl`, writes the
    /// lineage log to `openlineage.log` and leaves the hostname out of
    /// namespaces.
    pub fn with_file_transport() -> Self {
        let ws = Self::new();
        ws.write_config(
            r#"[client.transport]
type = "file"
path = "events.jsonl"

[logging]
file = "openlineage.log"

[namespace]
include_hostname = false
"#,
        );
        ws
    }

    /// Get the path to the workspace directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the config file.
    pub fn config_path(&self) -> PathBuf {
        self.path().join(CONFIG_FILE)
    }

    /// Write `olkit.toml`, with relative paths resolved against the workspace.
    pub fn write_config(&self, content: &str) {
        let resolved = content
            .replace("\"events.jsonl\"", &quoted(&self.events_path()))
            .replace("\"openlineage.log\"", &quoted(&self.log_path()));
        fs::write(self.config_path(), resolved).expect("Failed to write config");
    }

    /// Default event file.
    pub fn events_path(&self) -> PathBuf {
        self.path().join("events.jsonl")
    }

    /// Default lineage log file.
    pub fn log_path(&self) -> PathBuf {
        self.path().join("openlineage.log")
    }

    /// Read a file relative to the workspace; empty if absent.
    pub fn read_file(&self, name: &str) -> String {
        fs::read_to_string(self.path().join(name)).unwrap_or_default()
    }

    /// Parse every line of the event file.
    pub fn events(&self) -> Vec<Value> {
        fs::read_to_string(self.events_path())
            .unwrap_or_default()
            .lines()
            .map(|line| serde_json::from_str(line).expect("event line is not JSON"))
            .collect()
    }

    /// Lines of the lineage log file.
    pub fn log_lines(&self) -> Vec<String> {
        self.read_file("openlineage.log")
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

fn quoted(path: &Path) -> String {
    // TOML basic strings need escaped backslashes on Windows
    format!("\"{}\"", path.display().to_string().replace('\\', "\\\\"))
}
