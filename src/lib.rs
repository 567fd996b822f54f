//! # courier
//!
//! Configurable outbound-service HTTP client with a read-through cache and
//! pluggable backends.
//!
//! ## Overview
//!
//! A [`ServiceClient`] issues HTTP requests on behalf of a caller through
//! three backend modules resolved once at construction time: a transport
//! (always the built-in `reqwest`-based one), an optional cache, and a
//! logger. Every verb method routes through a single dispatch routine that
//! validates the call, consults the cache when enabled, invokes the
//! transport on a miss, writes the fresh body back through, applies the
//! caller's transformer, and records the outcome.
//!
//! ## Key properties
//!
//! - **Validation before execution**: configuration misuse fails before any
//!   collaborator is invoked.
//! - **At most one network call per cache hit**: a live cache entry
//!   short-circuits the transport entirely.
//! - **Uniform transformation**: a caller-supplied transformer is applied
//!   identically on the cache-hit and cache-miss paths.
//! - **Errors are logged, then propagated unchanged**: the client never
//!   retries or swallows a transport failure.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use courier::{CacheSettings, ClientConfig, RequestOptions, ServiceClient};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> courier::Result<()> {
//!     let config = ClientConfig::new().with_cache(
//!         CacheSettings::remote("http://cache.svc/entries")
//!             .with_expiry(Duration::from_secs(60)),
//!     );
//!     let client = ServiceClient::new(config)?;
//!
//!     let body = client
//!         .get(RequestOptions::new("http://widgets.svc/widgets/1"))
//!         .await?;
//!     println!("{body}");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Module builder and call orchestration |
//! | [`config`] | Construction-time configuration surface |
//! | [`request`] | Per-call options, verbs, body transformer |
//! | [`transport`] | Transport capability and the default `reqwest` backend |
//! | [`cache`] | Cache capability, remote driver, key derivation |
//! | [`logger`] | Logger capability and the default console logger |

pub mod cache;
pub mod client;
pub mod config;
pub mod logger;
pub mod request;
pub mod transport;

// Re-export main types for convenience
pub use cache::{CacheBackend, CacheError, CacheKey, CacheLookup, CacheWrite, RemoteCache};
pub use client::{ClientStats, ServiceClient};
pub use config::{CacheSettings, ClientConfig, LoggerSettings};
pub use logger::{ConsoleLogger, Logger, RequestDescriptor, ResponseDescriptor, Verbosity};
pub use request::{BodyTransformer, Method, RequestOptions};
pub use transport::{ResponseEnvelope, Transport, TransportError, TransportRequest};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
