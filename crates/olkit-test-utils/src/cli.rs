// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 olkit Contributors

//! CLI command helpers for testing the olkit binary.

use assert_cmd::Command;
use std::path::Path;

/// Creates a new olkit Command for testing.
///
/// `RUST_LOG` and the olkit environment overrides are cleared so tests only
/// see the settings they pass explicitly.
///
/// # Example
/// ```ignore
/// use olkit_test_utils::olkit;
///
/// olkit()
///     .args(["multiply", "4", "7"])
///     .assert()
///     .success();
/// ```
#[allow(deprecated)] // cargo_bin is deprecated but still works for our use case
pub fn olkit() -> Command {
    let mut cmd = Command::cargo_bin("olkit").expect("olkit binary not found");
    for var in ENV_OVERRIDES {
        cmd.env_remove(var);
    }
    cmd
}

const ENV_OVERRIDES: [&str; 11] = [
    "RUST_LOG",
    "OPENLINEAGE_CLIENT_LOGGING",
    "OLKIT_URL",
    "OLKIT_CLIENT_PARAM",
    "OLKIT_LOG_LEVEL",
    "OLKIT_LOG_FORMAT",
    "OLKIT_LOG_FILE",
    "OLKIT_PROJECT",
    "OLKIT_ENVIRONMENT",
    "OLKIT_PREFIX",
    "OLKIT_INCLUDE_HOSTNAME",
];

/// Fluent API wrapper for common olkit command patterns.
pub struct OlkitCommand {
    cmd: Command,
}

impl OlkitCommand {
    /// Create a new OlkitCommand.
    pub fn new() -> Self {
        Self { cmd: olkit() }
    }

    /// Set the working directory for the command.
    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.cmd.current_dir(dir);
        self
    }

    /// Point the command at a config file.
    pub fn config(mut self, path: &Path) -> Self {
        self.cmd.arg("--config").arg(path);
        self
    }

    /// Set an environment variable for the command.
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Add multiple arguments to the command.
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    /// Execute the command and assert success.
    pub fn run_success(mut self) -> assert_cmd::assert::Assert {
        self.cmd.assert().success()
    }

    /// Execute the command and assert failure.
    pub fn run_failure(mut self) -> assert_cmd::assert::Assert {
        self.cmd.assert().failure()
    }

    /// Get the underlying Command for custom assertions.
    pub fn into_inner(self) -> Command {
        self.cmd
    }
}

impl Default for OlkitCommand {
    fn default() -> Self {
        Self::new()
    }
}
