//! Transport capability: the seam between the orchestrator and whatever
//! performs the actual HTTP verb execution.
//!
//! The client always uses the default [`HttpTransport`]; the trait exists so
//! the orchestrator depends only on the capability, not on `reqwest`.

mod http;

pub use http::HttpTransport;

use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

/// What the transport backend is allowed to see for one call.
///
/// Orchestration-level fields (transformer, cache expiry) are stripped
/// before this value is built.
#[derive(Debug, Clone, Default)]
pub struct TransportRequest {
    pub uri: String,
    pub query: Vec<(String, String)>,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
}

/// Full response envelope returned by a transport backend.
///
/// The body is always parsed as structured data; the orchestrator caches and
/// transforms `body` and never re-reads the wire.
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    pub status: u16,
    pub body: Value,
}

/// One async operation per HTTP verb.
///
/// Backends reject on network failure or non-success status; the policy for
/// what counts as a failure is owned by the backend, not the orchestrator.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, request: &TransportRequest) -> Result<ResponseEnvelope>;
    async fn post(&self, request: &TransportRequest) -> Result<ResponseEnvelope>;
    async fn put(&self, request: &TransportRequest) -> Result<ResponseEnvelope>;
    async fn patch(&self, request: &TransportRequest) -> Result<ResponseEnvelope>;
    async fn delete(&self, request: &TransportRequest) -> Result<ResponseEnvelope>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {uri}")]
    Status { status: u16, uri: String },

    #[error("Transport error: {0}")]
    Other(String),
}
