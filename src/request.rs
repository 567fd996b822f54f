//! Per-call request surface: verb, options, and the body transformer.

use crate::transport::TransportRequest;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// HTTP verbs the client dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Upper-case verb name, as emitted in log records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied pure mapping from a raw response body to the desired shape.
///
/// Applied identically on the cache-hit and cache-miss paths; never forwarded
/// to the transport backend.
pub type BodyTransformer = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Options for a single call.
///
/// `uri` is required and doubles as the cache key; everything else is
/// optional. `cache_expiry` overrides the module-level default time-to-live
/// for the cache write this call may perform.
#[derive(Clone, Default)]
pub struct RequestOptions {
    pub uri: String,
    pub query: Vec<(String, String)>,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
    pub cache_expiry: Option<Duration>,
    pub transformer: Option<BodyTransformer>,
}

impl RequestOptions {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Default::default()
        }
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_cache_expiry(mut self, expiry: Duration) -> Self {
        self.cache_expiry = Some(expiry);
        self
    }

    pub fn with_transformer(
        mut self,
        transformer: impl Fn(Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.transformer = Some(Arc::new(transformer));
        self
    }

    /// Strip the orchestration-level fields (`transformer`, `cache_expiry`)
    /// and keep only what the transport backend should see.
    pub(crate) fn transport_request(&self) -> TransportRequest {
        TransportRequest {
            uri: self.uri.clone(),
            query: self.query.clone(),
            headers: self.headers.clone(),
            body: self.body.clone(),
        }
    }
}

impl fmt::Debug for RequestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestOptions")
            .field("uri", &self.uri)
            .field("query", &self.query)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .field("cache_expiry", &self.cache_expiry)
            .field("transformer", &self.transformer.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
