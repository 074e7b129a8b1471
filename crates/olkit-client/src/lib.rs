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
//! OpenLineage client layer for olkit
//!
//! - [`OpenLineageClient`]: emits [`LineageEvent`]s through a console or
//!   JSON-lines file [`Transport`]
//! - [`ClientSingleton`]: one lazily constructed client per process, first
//!   URL wins, construction guarded by a mutex
//! - [`LineageInjector`] / [`with_lineage_client`]: wraps a function so each
//!   call gets the singleton client in a named [`CallContext`] slot unless
//!   the caller supplied one
//!
//! # Example
//!
//! ```ignore
//! use olkit_client::{CallContext, ClientError, Job, LineageClient, LineageInjector, Run, RunEvent};
//!
//! let track = LineageInjector::new()
//!     .url("http://custom-server:5000")
//!     .client_param_name("lineage_client")
//!     .wrap(|job: Job, ctx: &CallContext<_>| -> Result<(), ClientError> {
//!         let client = ctx.client("lineage_client")?;
//!         client.emit(&RunEvent::start(Run::new(), job, "olkit").into())
//!     });
//! track.invoke(Job::new("ol_poc.dev", "daily_load"))?;
//! ```

/// Client traits and the default client
pub mod client;
/// Client error type
pub mod error;
pub mod event;
pub mod inject;
pub mod singleton;
pub mod transport;

pub use client::{FromUrl, LineageClient, OpenLineageClient};
pub use error::{ClientError, ClientResult};
pub use event::{
    ColumnLineageDatasetFacet, ColumnLineageField, Dataset, DatasetEvent, DatasetFacets,
    DatasetVersionDatasetFacet, InputField, Job, LineageEvent, Run, RunEvent, RunState,
    SchemaDatasetFacet, SchemaField, DATASET_EVENT_SCHEMA_URL, FACET_PRODUCER,
    RUN_EVENT_SCHEMA_URL,
};
pub use inject::{
    with_lineage_client, CallContext, InjectOptions, Injected, LineageInjector,
    DEFAULT_CLIENT_PARAM, DEFAULT_URL,
};
pub use singleton::{global, ClientSingleton};
pub use transport::{ConsoleTransport, FileTransport, Transport};
