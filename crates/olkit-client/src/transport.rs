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
//! Event transports.
//!
//! A transport receives fully built events and writes them somewhere.
//! There is no network transport; events go to the client log channel or
//! to a JSON-lines file.

use crate::error::{ClientError, ClientResult};
use crate::event::LineageEvent;
use olkit_observability::{lineage_debug, lineage_info};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Destination for emitted events
pub trait Transport: Send + Sync + fmt::Debug {
    /// Deliver one event
    fn send(&self, event: &LineageEvent) -> ClientResult<()>;

    /// Short name used in log lines
    fn kind(&self) -> &'static str;
}

/// Logs each event as JSON at INFO on the `openlineage::client` target
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleTransport;

impl Transport for ConsoleTransport {
    fn send(&self, event: &LineageEvent) -> ClientResult<()> {
        let payload = serde_json::to_string(event)?;
        lineage_info!(event_type = %event.label(), "{}", payload);
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "console"
    }
}

/// Appends each event as one JSON line
pub struct FileTransport {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileTransport {
    /// Open (or create) the file in append mode
    pub fn open(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| ClientError::TransportFile {
                path: path.clone(),
                source,
            })?;

        Ok(FileTransport {
            path,
            file: Mutex::new(file),
        })
    }

    /// File events are appended to
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Debug for FileTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileTransport")
            .field("path", &self.path)
            .finish()
    }
}

impl Transport for FileTransport {
    fn send(&self, event: &LineageEvent) -> ClientResult<()> {
        let mut line = serde_json::to_vec(event)?;
        line.push(b'\n');

        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.write_all(&line)?;
        file.flush()?;

        lineage_debug!(
            event_type = %event.label(),
            "Appended event to {}",
            self.path.display()
        );
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "file"
    }
}
