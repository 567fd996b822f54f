use crate::cache::CacheKey;
use crate::client::builder::{CacheModule, LoggerModule, ModuleBuilder, TransportModule};
use crate::config::ClientConfig;
use crate::logger::{RequestDescriptor, ResponseDescriptor};
use crate::request::{BodyTransformer, Method, RequestOptions};
use crate::transport::{ResponseEnvelope, TransportRequest};
use crate::{Error, ErrorContext, Result};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::debug;

/// Snapshot of the client's cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientStats {
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
}

struct AtomicStats {
    hits: AtomicU64,
    misses: AtomicU64,
    sets: AtomicU64,
}

impl AtomicStats {
    fn new() -> Self {
        Self {
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            sets: AtomicU64::new(0),
        }
    }

    fn to_stats(&self) -> ClientStats {
        ClientStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            sets: self.sets.load(Ordering::Relaxed),
        }
    }
}

/// Outbound-service client.
///
/// Owns one resolved instance of each backend module for its lifetime. Every
/// verb method routes through the same dispatch routine: validate, consult
/// the cache when enabled, invoke the transport on a miss, write through,
/// apply the caller's transformer, and record the outcome.
///
/// Calls are independent units of work; the client imposes no ordering or
/// deduplication between concurrent calls, including concurrent misses on
/// the same key (last write wins at the backend).
pub struct ServiceClient {
    transport: TransportModule,
    cache: CacheModule,
    logger: LoggerModule,
    stats: AtomicStats,
}

impl ServiceClient {
    /// Build a client from configuration. Fails synchronously with a
    /// configuration error; no I/O is performed here.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let modules = ModuleBuilder::new(config).build()?;
        Ok(Self {
            transport: modules.transport,
            cache: modules.cache,
            logger: modules.logger,
            stats: AtomicStats::new(),
        })
    }

    pub async fn get(&self, options: RequestOptions) -> Result<Value> {
        self.dispatch(Method::Get, options).await
    }

    pub async fn post(&self, options: RequestOptions) -> Result<Value> {
        self.dispatch(Method::Post, options).await
    }

    pub async fn put(&self, options: RequestOptions) -> Result<Value> {
        self.dispatch(Method::Put, options).await
    }

    pub async fn patch(&self, options: RequestOptions) -> Result<Value> {
        self.dispatch(Method::Patch, options).await
    }

    pub async fn delete(&self, options: RequestOptions) -> Result<Value> {
        self.dispatch(Method::Delete, options).await
    }

    /// Whether calls will consult the cache.
    pub fn cache_enabled(&self) -> bool {
        self.cache.is_enabled()
    }

    /// Snapshot current cache counters.
    pub fn stats(&self) -> ClientStats {
        self.stats.to_stats()
    }

    async fn dispatch(&self, method: Method, options: RequestOptions) -> Result<Value> {
        let resolved_expiry = self.validate(&options)?;
        let descriptor = RequestDescriptor {
            method,
            uri: &options.uri,
        };

        if self.cache.is_enabled() {
            let key = CacheKey::from_uri(&options.uri);
            let started = Instant::now();
            let lookup = self.cache.driver.get(&key).await?;
            if lookup.is_cached {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                self.logger
                    .driver
                    .info(descriptor, ResponseDescriptor::cache_hit(started.elapsed()));
                let data = lookup.data.unwrap_or(Value::Null);
                return Ok(apply_transformer(&options.transformer, data));
            }
            self.stats.misses.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, "cache miss, falling through to transport");
        }

        let request = options.transport_request();
        let started = Instant::now();
        let response = match self.invoke_transport(method, &request).await {
            Ok(response) => response,
            Err(error) => {
                self.logger.driver.error(descriptor, &error);
                return Err(error);
            }
        };
        self.logger
            .driver
            .info(descriptor, ResponseDescriptor::completed(started.elapsed()));

        if let Some(expiry) = resolved_expiry {
            let key = CacheKey::from_uri(&options.uri);
            self.cache.driver.set(&key, &response.body, expiry).await?;
            self.stats.sets.fetch_add(1, Ordering::Relaxed);
        }

        Ok(apply_transformer(&options.transformer, response.body))
    }

    /// Fail fast, before any collaborator is invoked. Returns the resolved
    /// time-to-live for the cache write this call may perform (`Some` iff
    /// the cache module is enabled).
    fn validate(&self, options: &RequestOptions) -> Result<Option<Duration>> {
        if options.uri.is_empty() {
            return Err(Error::configuration_with_context(
                "please provide uri",
                ErrorContext::new().with_field_path("options.uri"),
            ));
        }
        if !self.cache.is_enabled() {
            return Ok(None);
        }
        match options.cache_expiry.or(self.cache.default_expiry()) {
            Some(expiry) => Ok(Some(expiry)),
            None => Err(Error::configuration_with_context(
                "either set a cache expiry when building the client or pass cache_expiry in the call options",
                ErrorContext::new().with_field_path("options.cache_expiry"),
            )),
        }
    }

    async fn invoke_transport(
        &self,
        method: Method,
        request: &TransportRequest,
    ) -> Result<ResponseEnvelope> {
        let driver = &self.transport.driver;
        match method {
            Method::Get => driver.get(request).await,
            Method::Post => driver.post(request).await,
            Method::Put => driver.put(request).await,
            Method::Patch => driver.patch(request).await,
            Method::Delete => driver.delete(request).await,
        }
    }
}

fn apply_transformer(transformer: &Option<BodyTransformer>, body: Value) -> Value {
    match transformer {
        Some(transform) => transform(body),
        None => body,
    }
}
