//! Call-time client injection.
//!
//! A wrapped function receives its arguments plus a [`CallContext`] of named
//! client slots. On every call the wrapper obtains the singleton client and
//! puts it under the configured slot name, unless the caller already filled
//! that slot. Nothing is constructed when the function is wrapped.
//!
//! ```ignore
//! use olkit_client::{with_lineage_client, CallContext, ClientError, OpenLineageClient};
//!
//! let multiply = with_lineage_client(
//!     |(a, b): (i64, i64), ctx: &CallContext<OpenLineageClient>| -> Result<i64, ClientError> {
//!         let client = ctx.client("ol_client")?;
//!         tracing::info!("Using OpenLineage client: {}", client);
//!         Ok(a * b)
//!     },
//! );
//! assert_eq!(multiply.invoke((4, 7))?, 28);
//! ```

use crate::client::{FromUrl, OpenLineageClient};
use crate::error::{ClientError, ClientResult};
use crate::singleton::{global, ClientSingleton};
use olkit_observability::lineage_debug;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Default endpoint passed to first-time construction
pub const DEFAULT_URL: &str = "http://localhost:5000";

/// Default slot name for the injected client
pub const DEFAULT_CLIENT_PARAM: &str = "ol_client";

/// The two injection options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectOptions {
    /// Only used if this call constructs the singleton
    pub url: String,
    /// Slot that receives the client
    pub client_param_name: String,
}

impl Default for InjectOptions {
    fn default() -> Self {
        InjectOptions {
            url: DEFAULT_URL.to_string(),
            client_param_name: DEFAULT_CLIENT_PARAM.to_string(),
        }
    }
}

/// Named client slots passed alongside a wrapped function's arguments
pub struct CallContext<C> {
    slots: HashMap<String, Arc<C>>,
}

impl<C> CallContext<C> {
    /// An empty context
    pub fn new() -> Self {
        CallContext {
            slots: HashMap::new(),
        }
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with_client(mut self, name: impl Into<String>, client: Arc<C>) -> Self {
        self.insert(name, client);
        self
    }

    /// Fill a slot, returning what it held before
    pub fn insert(&mut self, name: impl Into<String>, client: Arc<C>) -> Option<Arc<C>> {
        self.slots.insert(name.into(), client)
    }

    /// Client in slot `name`, if any
    pub fn get(&self, name: &str) -> Option<&Arc<C>> {
        self.slots.get(name)
    }

    /// Like [`get`](Self::get), failing with [`ClientError::MissingClient`]
    pub fn client(&self, name: &str) -> ClientResult<&Arc<C>> {
        self.get(name)
            .ok_or_else(|| ClientError::MissingClient(name.to_string()))
    }

    /// True when slot `name` is filled
    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Number of filled slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when no slot is filled
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<C> Default for CallContext<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for CallContext<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.slots.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("CallContext").field("slots", &names).finish()
    }
}

/// Factory form: set options, then [`wrap`](Self::wrap) a function
pub struct LineageInjector<C: 'static = OpenLineageClient> {
    options: InjectOptions,
    singleton: &'static ClientSingleton<C>,
}

impl LineageInjector<OpenLineageClient> {
    /// Injector backed by the process-wide singleton
    pub fn new() -> Self {
        Self::with_singleton(global())
    }
}

impl Default for LineageInjector<OpenLineageClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: 'static> LineageInjector<C> {
    /// Injector backed by a caller-owned singleton
    pub fn with_singleton(singleton: &'static ClientSingleton<C>) -> Self {
        LineageInjector {
            options: InjectOptions::default(),
            singleton,
        }
    }

    /// URL used when the singleton is first constructed
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.options.url = url.into();
        self
    }

    /// Slot the client is injected into
    pub fn client_param_name(mut self, name: impl Into<String>) -> Self {
        self.options.client_param_name = name.into();
        self
    }

    /// Current options
    pub fn options(&self) -> &InjectOptions {
        &self.options
    }

    /// Wrap `func`; the singleton is not touched until the first call
    pub fn wrap<F>(self, func: F) -> Injected<C, F> {
        Injected {
            options: self.options,
            singleton: self.singleton,
            func,
        }
    }
}

/// Direct form: wrap `func` with default options and the global singleton
pub fn with_lineage_client<F>(func: F) -> Injected<OpenLineageClient, F> {
    LineageInjector::new().wrap(func)
}

/// A function wrapped for client injection
pub struct Injected<C: 'static, F> {
    options: InjectOptions,
    singleton: &'static ClientSingleton<C>,
    func: F,
}

impl<C: FromUrl + 'static, F> Injected<C, F> {
    /// Call with a caller-supplied context; a filled slot is left alone
    pub fn call<A, R, E>(&self, args: A, mut ctx: CallContext<C>) -> Result<R, E>
    where
        F: Fn(A, &CallContext<C>) -> Result<R, E>,
        E: From<ClientError>,
    {
        let client = self.singleton.get_or_init(&self.options.url)?;

        if ctx.contains(&self.options.client_param_name) {
            lineage_debug!(
                slot = %self.options.client_param_name,
                "Caller supplied a client; not injecting"
            );
        } else {
            ctx.insert(self.options.client_param_name.clone(), client);
        }

        (self.func)(args, &ctx)
    }

    /// Call with an empty context
    pub fn invoke<A, R, E>(&self, args: A) -> Result<R, E>
    where
        F: Fn(A, &CallContext<C>) -> Result<R, E>,
        E: From<ClientError>,
    {
        self.call(args, CallContext::new())
    }

    /// Options this wrapper was built with
    pub fn options(&self) -> &InjectOptions {
        &self.options
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Stub(String);

    impl FromUrl for Stub {
        fn from_url(url: &str) -> ClientResult<Self> {
            Ok(Stub(url.to_string()))
        }
    }

    #[test]
    fn test_default_options() {
        let options = InjectOptions::default();
        assert_eq!(options.url, "http://localhost:5000");
        assert_eq!(options.client_param_name, "ol_client");
    }

    #[test]
    fn test_injects_into_default_slot() {
        static SINGLETON: ClientSingleton<Stub> = ClientSingleton::new();
        let wrapped = LineageInjector::with_singleton(&SINGLETON).wrap(
            |x: u32, ctx: &CallContext<Stub>| -> ClientResult<(u32, String)> {
                Ok((x * 2, ctx.client("ol_client")?.0.clone()))
            },
        );

        let (value, url) = wrapped.invoke(21).unwrap();
        assert_eq!(value, 42);
        assert_eq!(url, "http://localhost:5000");
    }

    #[test]
    fn test_wrapping_is_lazy() {
        static SINGLETON: ClientSingleton<Stub> = ClientSingleton::new();
        let wrapped = LineageInjector::with_singleton(&SINGLETON)
            .url("http://lazy:5000")
            .wrap(|_: (), _: &CallContext<Stub>| -> ClientResult<()> { Ok(()) });

        assert!(!SINGLETON.is_initialized());
        wrapped.invoke(()).unwrap();
        assert_eq!(SINGLETON.configured_url().as_deref(), Some("http://lazy:5000"));
    }

    #[test]
    fn test_context_debug_lists_slot_names() {
        let ctx = CallContext::new()
            .with_client("b", Arc::new(Stub("x".into())))
            .with_client("a", Arc::new(Stub("y".into())));
        assert_eq!(format!("{:?}", ctx), r#"CallContext { slots: ["a", "b"] }"#);
        assert_eq!(ctx.len(), 2);
        assert!(matches!(
            ctx.client("ol_client"),
            Err(ClientError::MissingClient(name)) if name == "ol_client"
        ));
    }
}
