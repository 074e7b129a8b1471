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
//! Lazily constructed, process-wide lineage client.
//!
//! A [`ClientSingleton`] moves from empty to initialized exactly once. The
//! first successful construction fixes the URL; later requests get the same
//! `Arc` back whatever URL they pass. A differing URL is logged as a warning
//! and otherwise ignored.
//!
//! Construction runs while the slot's mutex is held, so concurrent first
//! callers construct at most one client. A failed construction leaves the
//! singleton empty and the next caller tries again.

use crate::client::{FromUrl, OpenLineageClient};
use crate::error::{ClientError, ClientResult};
use olkit_observability::{lineage_debug, lineage_warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

struct Initialized<C> {
    url: String,
    client: Arc<C>,
}

/// At-most-once holder for a client of type `C`
pub struct ClientSingleton<C> {
    slot: Mutex<Option<Initialized<C>>>,
}

impl<C> ClientSingleton<C> {
    /// An empty singleton, usable in a `static`
    pub const fn new() -> Self {
        ClientSingleton {
            slot: Mutex::new(None),
        }
    }

    /// Return the client, constructing it with `init` on first use
    pub fn get_or_init_with<F>(&self, url: &str, init: F) -> ClientResult<Arc<C>>
    where
        F: FnOnce(&str) -> ClientResult<C>,
    {
        let mut slot = self.lock();

        if let Some(existing) = slot.as_ref() {
            if existing.url != url {
                lineage_warn!(
                    configured = %existing.url,
                    requested = %url,
                    "OpenLineage client already initialized; ignoring requested URL"
                );
            }
            return Ok(Arc::clone(&existing.client));
        }

        lineage_debug!("Initializing OpenLineage client for {}", url);
        let client = Arc::new(init(url)?);
        *slot = Some(Initialized {
            url: url.to_string(),
            client: Arc::clone(&client),
        });
        Ok(client)
    }

    /// The constructed client, or [`ClientError::NotInitialized`]
    pub fn client(&self) -> ClientResult<Arc<C>> {
        self.lock()
            .as_ref()
            .map(|initialized| Arc::clone(&initialized.client))
            .ok_or(ClientError::NotInitialized)
    }

    /// True once a client has been constructed
    pub fn is_initialized(&self) -> bool {
        self.lock().is_some()
    }

    /// URL the client was constructed with
    pub fn configured_url(&self) -> Option<String> {
        self.lock()
            .as_ref()
            .map(|initialized| initialized.url.clone())
    }

    fn lock(&self) -> MutexGuard<'_, Option<Initialized<C>>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: FromUrl> ClientSingleton<C> {
    /// Return the client, constructing it with [`FromUrl`] on first use
    pub fn get_or_init(&self, url: &str) -> ClientResult<Arc<C>> {
        self.get_or_init_with(url, C::from_url)
    }
}

impl<C> Default for ClientSingleton<C> {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL: ClientSingleton<OpenLineageClient> = ClientSingleton::new();

/// The process-wide [`OpenLineageClient`] singleton
pub fn global() -> &'static ClientSingleton<OpenLineageClient> {
    &GLOBAL
}
