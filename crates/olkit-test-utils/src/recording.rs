// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 olkit Contributors

//! In-memory lineage client.

use olkit_client::{ClientResult, FromUrl, LineageClient, LineageEvent};
use std::sync::{Mutex, PoisonError};

/// Records every emitted event; never fails.
#[derive(Debug, Default)]
pub struct RecordingClient {
    url: String,
    events: Mutex<Vec<LineageEvent>>,
}

impl RecordingClient {
    /// Create a recorder reporting the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            events: Mutex::new(Vec::new()),
        }
    }

    /// URL the recorder was built with.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Snapshot of the events emitted so far.
    pub fn events(&self) -> Vec<LineageEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Labels (`START`, `COMPLETE`, `DATASET`, ...) in emission order.
    pub fn labels(&self) -> Vec<String> {
        self.events().iter().map(LineageEvent::label).collect()
    }
}

impl LineageClient for RecordingClient {
    fn emit(&self, event: &LineageEvent) -> ClientResult<()> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
        Ok(())
    }
}

impl FromUrl for RecordingClient {
    fn from_url(url: &str) -> ClientResult<Self> {
        Ok(Self::new(url))
    }
}
