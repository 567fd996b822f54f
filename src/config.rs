//! Construction-time configuration surface.
//!
//! A [`ClientConfig`] is handed to [`ServiceClient::new`] once; the builder
//! validates it and resolves the three backend modules from it. Invalid
//! combinations fail fast with a configuration error before any I/O.
//!
//! [`ServiceClient::new`]: crate::ServiceClient::new

use crate::cache::CacheBackend;
use crate::logger::{Logger, Verbosity};
use std::sync::Arc;
use std::time::Duration;

/// Top-level client configuration. The transport backend is always the
/// built-in one and carries no configuration here.
#[derive(Clone, Default)]
pub struct ClientConfig {
    pub cache: Option<CacheSettings>,
    pub logger: Option<LoggerSettings>,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache(mut self, cache: CacheSettings) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_logger(mut self, logger: LoggerSettings) -> Self {
        self.logger = Some(logger);
        self
    }
}

/// Cache module settings.
///
/// Exactly one of `uri` (default remote driver) or `backend` (custom driver)
/// must be supplied; neither is a configuration error. When both are set the
/// custom backend wins. `expiry` is the module-level default time-to-live
/// and only applies to the remote driver; a custom backend leaves the module
/// expiry unset, so every call must pass its own `cache_expiry`.
#[derive(Clone, Default)]
pub struct CacheSettings {
    pub uri: Option<String>,
    pub expiry: Option<Duration>,
    pub backend: Option<Arc<dyn CacheBackend>>,
}

impl CacheSettings {
    /// Point the default remote-cache driver at a cache service.
    pub fn remote(uri: impl Into<String>) -> Self {
        Self {
            uri: Some(uri.into()),
            ..Default::default()
        }
    }

    /// Supply a custom cache backend.
    pub fn custom(backend: Arc<dyn CacheBackend>) -> Self {
        Self {
            backend: Some(backend),
            ..Default::default()
        }
    }

    /// Default time-to-live for calls that do not pass `cache_expiry`.
    pub fn with_expiry(mut self, expiry: Duration) -> Self {
        self.expiry = Some(expiry);
        self
    }
}

/// Logger module settings. Without any, the builder falls back to the
/// console logger at [`Verbosity::Normal`].
#[derive(Clone, Default)]
pub struct LoggerSettings {
    pub backend: Option<Arc<dyn Logger>>,
    pub verbosity: Verbosity,
}

impl LoggerSettings {
    /// Supply a custom logger backend.
    pub fn custom(backend: Arc<dyn Logger>) -> Self {
        Self {
            backend: Some(backend),
            verbosity: Verbosity::default(),
        }
    }

    /// Use the console logger at the given verbosity.
    pub fn console(verbosity: Verbosity) -> Self {
        Self {
            backend: None,
            verbosity,
        }
    }
}
