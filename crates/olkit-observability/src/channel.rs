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
//! The `openlineage` and `openlineage.client` log channels.
//!
//! Events whose `tracing` target is `openlineage` or `openlineage::client`
//! (or anything below them) are routed to a channel. Each channel has a
//! threshold and a list of handlers (console, file). The client channel
//! forwards records to the parent's handlers when it propagates; a handler
//! shared by both channels writes each record once.
//!
//! [`LineageLogging::configure`] rebuilds both channels from scratch, so it can
//! be called any number of times without stacking handlers.
//!
//! # Example
//!
//! ```no_run
//! use olkit_observability::{
//!     configure_lineage_logging, LineageLogSettings, LogOverrides, Severity, CLIENT_TARGET,
//! };
//!
//! let settings = LineageLogSettings::new(Severity::Debug).with_file("openlineage.log");
//! let loggers = configure_lineage_logging(&settings, &LogOverrides::from_env())?;
//! assert_eq!(loggers.client.handler_count(), 2);
//!
//! tracing::debug!(target: CLIENT_TARGET, "emitting START event");
//! # Ok::<(), olkit_observability::LogError>(())
//! ```

use crate::config::{LineageLogSettings, LogError};
use crate::level::{LogOverrides, Severity, CLIENT_LOGGING_ENV};
use crate::template::{LogRecord, LogTemplate};
use chrono::Local;
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::field::{Field, Visit};
use tracing::{debug, info, Event, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// Dotted name of the parent channel
pub const PARENT_CHANNEL: &str = "openlineage";
/// Dotted name of the client channel
pub const CLIENT_CHANNEL: &str = "openlineage.client";
/// `tracing` target that lands on the parent channel
pub const PARENT_TARGET: &str = "openlineage";
/// `tracing` target that lands on the client channel
pub const CLIENT_TARGET: &str = "openlineage::client";

/// Which of the two channels a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelId {
    /// `openlineage`
    Parent,
    /// `openlineage.client`
    Client,
}

impl ChannelId {
    /// Dotted channel name
    pub fn name(self) -> &'static str {
        match self {
            ChannelId::Parent => PARENT_CHANNEL,
            ChannelId::Client => CLIENT_CHANNEL,
        }
    }

    /// `tracing` target for events on this channel
    pub fn target(self) -> &'static str {
        match self {
            ChannelId::Parent => PARENT_TARGET,
            ChannelId::Client => CLIENT_TARGET,
        }
    }

    /// Resolve a `tracing` target (`::` or `.` separated) to a channel
    pub fn for_target(target: &str) -> Option<Self> {
        let mut parts = target
            .split(|c: char| c == ':' || c == '.')
            .filter(|part| !part.is_empty());

        if parts.next() != Some(PARENT_CHANNEL) {
            return None;
        }
        match parts.next() {
            Some("client") => Some(ChannelId::Client),
            _ => Some(ChannelId::Parent),
        }
    }
}

/// Destination kind of a handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerKind {
    /// Standard error
    Console,
    /// A file opened in append mode
    File(PathBuf),
}

/// A line-oriented output shared by one or both channels
pub struct Handler {
    kind: HandlerKind,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl Handler {
    fn console() -> Self {
        Handler {
            kind: HandlerKind::Console,
            writer: Mutex::new(Box::new(io::stderr())),
        }
    }

    fn file(path: &Path) -> Result<Self, LogError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| LogError::LogFile {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Handler {
            kind: HandlerKind::File(path.to_path_buf()),
            writer: Mutex::new(Box::new(file)),
        })
    }

    /// Destination of this handler
    pub fn kind(&self) -> &HandlerKind {
        &self.kind
    }

    fn write_line(&self, line: &str) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        // A failing sink must not take the application down with it
        let _ = writeln!(writer, "{}", line);
        let _ = writer.flush();
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler").field("kind", &self.kind).finish()
    }
}

#[derive(Debug)]
struct ChannelState {
    level: Option<Severity>,
    handlers: Vec<Arc<Handler>>,
    propagate: bool,
}

impl Default for ChannelState {
    fn default() -> Self {
        ChannelState {
            level: None,
            handlers: Vec::new(),
            propagate: true,
        }
    }
}

#[derive(Debug, Default)]
struct RouterState {
    template: LogTemplate,
    parent: ChannelState,
    client: ChannelState,
}

impl RouterState {
    fn channel(&self, id: ChannelId) -> &ChannelState {
        match id {
            ChannelId::Parent => &self.parent,
            ChannelId::Client => &self.client,
        }
    }

    fn channel_mut(&mut self, id: ChannelId) -> &mut ChannelState {
        match id {
            ChannelId::Parent => &mut self.parent,
            ChannelId::Client => &mut self.client,
        }
    }

    /// Own level, or the parent's when the client channel has none
    fn effective_level(&self, id: ChannelId) -> Option<Severity> {
        match id {
            ChannelId::Parent => self.parent.level,
            ChannelId::Client => self.client.level.or(self.parent.level),
        }
    }
}

/// Shared state of the two lineage channels.
///
/// Cloning is cheap; clones observe the same channels.
#[derive(Debug, Clone, Default)]
pub struct LineageLogging {
    state: Arc<RwLock<RouterState>>,
}

impl LineageLogging {
    /// Unconfigured channels: no handlers, no threshold
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(&self) -> RwLockReadGuard<'_, RouterState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, RouterState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace both channels' configuration.
    ///
    /// The template and log file are prepared before anything is touched, so a
    /// failure leaves the previous configuration in place.
    pub fn configure(
        &self,
        settings: &LineageLogSettings,
        overrides: &LogOverrides,
    ) -> Result<LineageLoggers, LogError> {
        let template = LogTemplate::parse(settings.effective_format())?;

        let mut handlers: Vec<Arc<Handler>> = Vec::with_capacity(2);
        if let Some(path) = settings.file.as_deref() {
            handlers.push(Arc::new(Handler::file(path)?));
        }
        handlers.push(Arc::new(Handler::console()));

        let client_override = overrides.client_level();

        {
            let mut state = self.write_state();
            state.template = template;
            for id in [ChannelId::Parent, ChannelId::Client] {
                let channel = state.channel_mut(id);
                channel.handlers.clone_from(&handlers);
                channel.level = Some(settings.level);
                channel.propagate = true;
            }
            if let Some(level) = client_override {
                state.client.level = Some(level);
            }
        }

        if let Some(level) = client_override {
            info!(
                level = %level,
                "Setting OpenLineage client logging level from {}",
                CLIENT_LOGGING_ENV
            );
        }
        debug!(target: CLIENT_TARGET, "OpenLineage client logging initialized");

        Ok(self.loggers())
    }

    /// Handles to both channels
    pub fn loggers(&self) -> LineageLoggers {
        LineageLoggers {
            parent: self.channel(ChannelId::Parent),
            client: self.channel(ChannelId::Client),
        }
    }

    /// Handle to one channel
    pub fn channel(&self, id: ChannelId) -> ChannelHandle {
        ChannelHandle {
            id,
            logging: self.clone(),
        }
    }

    /// Line template currently in effect
    pub fn template(&self) -> String {
        self.read_state().template.as_str().to_string()
    }

    /// A `tracing` layer that routes channel events to the handlers
    pub fn layer(&self) -> ChannelLayer {
        ChannelLayer {
            logging: self.clone(),
        }
    }

    /// Whether a channel event with this metadata should also reach
    /// non-channel layers (the application's own output).
    pub fn propagates_to_root(&self, metadata: &Metadata<'_>) -> bool {
        let Some(id) = ChannelId::for_target(metadata.target()) else {
            return false;
        };
        let state = self.read_state();
        let Some(level) = state.effective_level(id) else {
            return false;
        };
        let chain_propagates = match id {
            ChannelId::Parent => state.parent.propagate,
            ChannelId::Client => state.client.propagate && state.parent.propagate,
        };
        chain_propagates && level.admits(Severity::from_tracing(metadata.level()))
    }

    fn dispatch(
        &self,
        origin: ChannelId,
        name: &str,
        severity: Severity,
        message: &str,
        line: Option<u32>,
    ) {
        let state = self.read_state();
        let Some(level) = state.effective_level(origin) else {
            return;
        };
        if !level.admits(severity) {
            return;
        }

        let channel = state.channel(origin);
        let inherited: &[Arc<Handler>] = match origin {
            ChannelId::Client if channel.propagate => &state.parent.handlers,
            _ => &[],
        };
        if channel.handlers.is_empty() && inherited.is_empty() {
            return;
        }

        let rendered = state.template.render(&LogRecord {
            timestamp: Local::now(),
            name,
            severity,
            message,
            line,
        });

        let mut written: Vec<&Arc<Handler>> = Vec::with_capacity(2);
        for handler in channel.handlers.iter().chain(inherited) {
            if written.iter().any(|done| Arc::ptr_eq(done, handler)) {
                continue;
            }
            handler.write_line(&rendered);
            written.push(handler);
        }
    }
}

/// Handles returned by a configuration call
#[derive(Debug, Clone)]
pub struct LineageLoggers {
    /// The `openlineage` channel
    pub parent: ChannelHandle,
    /// The `openlineage.client` channel
    pub client: ChannelHandle,
}

/// A view onto one channel
#[derive(Debug, Clone)]
pub struct ChannelHandle {
    id: ChannelId,
    logging: LineageLogging,
}

impl ChannelHandle {
    /// Which channel this is
    pub fn id(&self) -> ChannelId {
        self.id
    }

    /// Dotted channel name
    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    /// `tracing` target for this channel
    pub fn target(&self) -> &'static str {
        self.id.target()
    }

    /// Threshold set on this channel
    pub fn level(&self) -> Option<Severity> {
        self.logging.read_state().channel(self.id).level
    }

    /// Change this channel's threshold
    pub fn set_level(&self, level: Severity) {
        self.logging.write_state().channel_mut(self.id).level = Some(level);
    }

    /// Number of handlers attached directly to this channel
    pub fn handler_count(&self) -> usize {
        self.logging.read_state().channel(self.id).handlers.len()
    }

    /// Destinations of the attached handlers, in attachment order
    pub fn handler_kinds(&self) -> Vec<HandlerKind> {
        self.logging
            .read_state()
            .channel(self.id)
            .handlers
            .iter()
            .map(|handler| handler.kind().clone())
            .collect()
    }

    /// Whether records continue to the parent and application outputs
    pub fn propagates(&self) -> bool {
        self.logging.read_state().channel(self.id).propagate
    }

    /// Enable or disable propagation
    pub fn set_propagate(&self, propagate: bool) {
        self.logging.write_state().channel_mut(self.id).propagate = propagate;
    }

    /// Whether a record of this severity would be written
    pub fn is_enabled_for(&self, severity: Severity) -> bool {
        self.logging
            .read_state()
            .effective_level(self.id)
            .is_some_and(|level| level.admits(severity))
    }

    /// Write a record straight to this channel's handlers
    pub fn log(&self, severity: Severity, message: &str) {
        self.logging
            .dispatch(self.id, self.id.name(), severity, message, None);
    }
}

/// `tracing` layer feeding channel events into [`LineageLogging`]
#[derive(Debug, Clone)]
pub struct ChannelLayer {
    logging: LineageLogging,
}

impl<S> Layer<S> for ChannelLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let Some(origin) = ChannelId::for_target(metadata.target()) else {
            return;
        };

        let mut visitor = RecordVisitor::default();
        event.record(&mut visitor);

        let severity = if visitor.critical {
            Severity::Critical
        } else {
            Severity::from_tracing(metadata.level())
        };
        let name = metadata.target().replace("::", ".");
        let message = visitor.finish();

        self.logging
            .dispatch(origin, &name, severity, &message, metadata.line());
    }
}

#[derive(Default)]
struct RecordVisitor {
    message: String,
    fields: Vec<String>,
    critical: bool,
}

impl RecordVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields.join(" ")
        } else {
            format!("{} {}", self.message, self.fields.join(" "))
        }
    }
}

impl Visit for RecordVisitor {
    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "critical" {
            self.critical = value;
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }
}

static GLOBAL: OnceLock<LineageLogging> = OnceLock::new();

/// The process-wide channel state
pub fn global() -> &'static LineageLogging {
    GLOBAL.get_or_init(LineageLogging::new)
}

/// Configure the process-wide channels.
///
/// If no global subscriber has been installed yet, one carrying only the
/// channel layer is installed so the channels produce output on their own.
pub fn configure_lineage_logging(
    settings: &LineageLogSettings,
    overrides: &LogOverrides,
) -> Result<LineageLoggers, LogError> {
    crate::initialization::ensure_channel_subscriber();
    global().configure(settings, overrides)
}
