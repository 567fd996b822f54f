use crate::cache::{CacheBackend, NullCache, RemoteCache};
use crate::config::ClientConfig;
use crate::logger::{ConsoleLogger, Logger};
use crate::transport::{HttpTransport, Transport};
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Resolved cache module: the driver plus the state the orchestrator checks
/// on every call. Effectively immutable after construction.
pub struct CacheModule {
    pub(crate) driver: Arc<dyn CacheBackend>,
    pub(crate) enabled: bool,
    pub(crate) expiry: Option<Duration>,
}

impl std::fmt::Debug for CacheModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheModule")
            .field("enabled", &self.enabled)
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}

impl CacheModule {
    fn disabled() -> Self {
        Self {
            driver: Arc::new(NullCache),
            enabled: false,
            expiry: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Module-level default time-to-live; `None` means every call must pass
    /// its own `cache_expiry`.
    pub fn default_expiry(&self) -> Option<Duration> {
        self.expiry
    }
}

/// Resolved transport module. Always the default backend; there is no
/// custom-transport extension point.
pub struct TransportModule {
    pub(crate) driver: Arc<dyn Transport>,
}

/// Resolved logger module.
pub struct LoggerModule {
    pub(crate) driver: Arc<dyn Logger>,
}

pub(crate) struct Modules {
    pub(crate) transport: TransportModule,
    pub(crate) cache: CacheModule,
    pub(crate) logger: LoggerModule,
}

/// Validates a [`ClientConfig`] and resolves the three backend modules.
///
/// Resolution happens exactly once, synchronously, before any I/O: each
/// module ends up a tagged choice between a caller-supplied backend and the
/// built-in one, with no later rebinding.
pub(crate) struct ModuleBuilder {
    config: ClientConfig,
}

impl ModuleBuilder {
    pub(crate) fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub(crate) fn build(self) -> Result<Modules> {
        Ok(Modules {
            cache: self.build_cache_module()?,
            transport: Self::build_transport_module()?,
            logger: self.build_logger_module(),
        })
    }

    fn build_cache_module(&self) -> Result<CacheModule> {
        let Some(settings) = &self.config.cache else {
            return Ok(CacheModule::disabled());
        };

        if let Some(backend) = &settings.backend {
            // Custom backends leave the module expiry unset: each call must
            // resolve its own ttl via cache_expiry.
            return Ok(CacheModule {
                driver: Arc::clone(backend),
                enabled: true,
                expiry: None,
            });
        }

        if let Some(uri) = &settings.uri {
            Url::parse(uri).map_err(|e| {
                Error::configuration_with_context(
                    "cache service uri does not parse",
                    ErrorContext::new()
                        .with_field_path("cache.uri")
                        .with_details(e.to_string()),
                )
            })?;
            return Ok(CacheModule {
                driver: Arc::new(RemoteCache::new(uri.clone())?),
                enabled: true,
                expiry: settings.expiry,
            });
        }

        Err(Error::configuration_with_context(
            "either supply a custom cache backend or a cache service uri",
            ErrorContext::new().with_field_path("cache"),
        ))
    }

    fn build_transport_module() -> Result<TransportModule> {
        Ok(TransportModule {
            driver: Arc::new(HttpTransport::new()?),
        })
    }

    fn build_logger_module(&self) -> LoggerModule {
        let driver: Arc<dyn Logger> = match &self.config.logger {
            Some(settings) => match &settings.backend {
                Some(backend) => Arc::clone(backend),
                None => Arc::new(ConsoleLogger::new(settings.verbosity)),
            },
            None => Arc::new(ConsoleLogger::default()),
        };
        LoggerModule { driver }
    }
}
