// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 olkit Contributors

//! # olkit Test Utilities
//!
//! Shared test utilities for olkit crates providing:
//! - CLI command helpers for testing the `olkit` binary
//! - Temporary workspaces with config, log and event files
//! - An in-memory lineage client that records emitted events

pub mod cli;
pub mod recording;
pub mod workspace;

// Re-export commonly used items at crate root
pub use cli::{olkit, OlkitCommand};
pub use recording::RecordingClient;
pub use workspace::TestWorkspace;
