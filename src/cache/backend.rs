//! Cache backend implementations.

use super::key::CacheKey;
use crate::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Result of a cache lookup. `is_cached` is true iff a live entry existed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLookup {
    pub data: Option<Value>,
    pub is_cached: bool,
}

impl CacheLookup {
    pub fn hit(data: Value) -> Self {
        Self {
            data: Some(data),
            is_cached: true,
        }
    }

    pub fn miss() -> Self {
        Self {
            data: None,
            is_cached: false,
        }
    }
}

/// Acknowledgement of a cache write. A no-op success (`is_cached: false`) is
/// permitted when the expiry resolves to the do-not-cache sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheWrite {
    pub is_cached: bool,
}

/// Capability contract any cache backend, built-in or custom, must satisfy.
///
/// `expiry` is the concrete time-to-live the orchestrator resolved for the
/// call; a zero duration means "do not cache" and `set` must succeed with
/// `is_cached: false` without touching its store.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    async fn get(&self, key: &CacheKey) -> Result<CacheLookup>;
    async fn set(&self, key: &CacheKey, value: &Value, expiry: Duration) -> Result<CacheWrite>;
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("cache service answered status {status}")]
    Status { status: u16 },

    #[error("cache error: {0}")]
    Other(String),
}

/// Placeholder driver for a disabled cache module. Never consulted by the
/// orchestrator, which checks `is_enabled` first; answers a miss if it is.
pub struct NullCache;

#[async_trait]
impl CacheBackend for NullCache {
    async fn get(&self, _key: &CacheKey) -> Result<CacheLookup> {
        Ok(CacheLookup::miss())
    }

    async fn set(&self, _key: &CacheKey, _value: &Value, _expiry: Duration) -> Result<CacheWrite> {
        Ok(CacheWrite { is_cached: false })
    }
}

#[derive(Serialize)]
struct RemoteSetBody<'a> {
    key: &'a str,
    payload: &'a Value,
    lifetime: u64,
}

/// Default driver for a remote key/value cache service reachable over HTTP.
///
/// Lookups go out as `GET <uri>?key=<key>` and expect a JSON object whose
/// `data` field carries the payload (absent or null means miss). Writes go
/// out as `POST <uri>` with body `{key, payload, lifetime}`, lifetime in
/// whole seconds; an expiry that truncates to zero seconds is treated as
/// the do-not-cache sentinel and never reaches the wire.
pub struct RemoteCache {
    client: reqwest::Client,
    uri: String,
}

impl RemoteCache {
    pub fn new(uri: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| crate::Error::Cache(CacheError::Other(e.to_string())))?;
        Ok(Self {
            client,
            uri: uri.into(),
        })
    }
}

#[async_trait]
impl CacheBackend for RemoteCache {
    async fn get(&self, key: &CacheKey) -> Result<CacheLookup> {
        let response = self
            .client
            .get(&self.uri)
            .query(&[("key", key.as_str())])
            .send()
            .await
            .map_err(|e| crate::Error::Cache(CacheError::Http(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(crate::Error::Cache(CacheError::Status {
                status: status.as_u16(),
            }));
        }

        let envelope: Value = response
            .json()
            .await
            .map_err(|e| crate::Error::Cache(CacheError::Http(e)))?;

        match envelope.get("data") {
            Some(data) if !data.is_null() => Ok(CacheLookup::hit(data.clone())),
            _ => Ok(CacheLookup::miss()),
        }
    }

    async fn set(&self, key: &CacheKey, value: &Value, expiry: Duration) -> Result<CacheWrite> {
        // Lifetimes go over the wire in whole seconds, so anything that
        // truncates to zero is the do-not-cache sentinel: acknowledge
        // without a network call.
        let lifetime = expiry.as_secs();
        if lifetime == 0 {
            return Ok(CacheWrite { is_cached: false });
        }

        let body = RemoteSetBody {
            key: key.as_str(),
            payload: value,
            lifetime,
        };
        let response = self
            .client
            .post(&self.uri)
            .json(&body)
            .send()
            .await
            .map_err(|e| crate::Error::Cache(CacheError::Http(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(crate::Error::Cache(CacheError::Status {
                status: status.as_u16(),
            }));
        }

        Ok(CacheWrite { is_cached: true })
    }
}
