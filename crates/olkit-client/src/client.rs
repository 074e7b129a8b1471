use crate::error::{ClientError, ClientResult};
use crate::event::LineageEvent;
use crate::transport::{ConsoleTransport, Transport};
use olkit_observability::lineage_debug;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Something that can emit lineage events
pub trait LineageClient: Send + Sync {
    /// Emit one event
    fn emit(&self, event: &LineageEvent) -> ClientResult<()>;
}

/// Construction from an endpoint URL, used by the singleton
pub trait FromUrl: Sized {
    fn from_url(url: &str) -> ClientResult<Self>;
}

/// Client bound to an OpenLineage endpoint and a transport
#[derive(Clone)]
pub struct OpenLineageClient {
    url: Url,
    transport: Arc<dyn Transport>,
}

impl OpenLineageClient {
    /// Client using the console transport
    pub fn new(url: &str) -> ClientResult<Self> {
        Self::with_transport(url, Arc::new(ConsoleTransport))
    }

    /// Client using the given transport
    pub fn with_transport(url: &str, transport: Arc<dyn Transport>) -> ClientResult<Self> {
        let url = parse_endpoint(url)?;
        lineage_debug!(
            url = %url,
            transport = transport.kind(),
            "Constructed OpenLineage client"
        );
        Ok(OpenLineageClient { url, transport })
    }

    /// Endpoint this client was built for
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Name of the transport in use
    pub fn transport_kind(&self) -> &'static str {
        self.transport.kind()
    }
}

fn parse_endpoint(raw: &str) -> ClientResult<Url> {
    let url = Url::parse(raw).map_err(|e| ClientError::invalid_url(raw, e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ClientError::invalid_url(
            raw,
            format!("unsupported scheme '{}'", other),
        )),
    }
}

impl LineageClient for OpenLineageClient {
    fn emit(&self, event: &LineageEvent) -> ClientResult<()> {
        lineage_debug!(event_type = %event.label(), "Emitting event to {}", self.url);
        self.transport.send(event)
    }
}

impl FromUrl for OpenLineageClient {
    fn from_url(url: &str) -> ClientResult<Self> {
        Self::new(url)
    }
}

impl fmt::Debug for OpenLineageClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenLineageClient")
            .field("url", &self.url.as_str())
            .field("transport", &self.transport)
            .finish()
    }
}

impl fmt::Display for OpenLineageClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OpenLineageClient(url={}, transport={})",
            self.url,
            self.transport.kind()
        )
    }
}

impl<C: LineageClient + ?Sized> LineageClient for Arc<C> {
    fn emit(&self, event: &LineageEvent) -> ClientResult<()> {
        (**self).emit(event)
    }
}
