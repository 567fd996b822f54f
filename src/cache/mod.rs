//! Read-through cache support.
//!
//! The orchestrator only ever sees the [`CacheBackend`] capability and the
//! `{data, is_cached}` / `{is_cached}` envelopes it returns; entry storage,
//! expiry enforcement, and eviction are owned by the backend.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`CacheBackend`] | Trait any cache backend must satisfy |
//! | [`RemoteCache`] | Default driver for an HTTP key/value cache service |
//! | [`NullCache`] | Never-consulted driver backing a disabled module |
//! | [`CacheKey`] | Lookup discriminator derived from the request uri |

mod backend;
mod key;

pub use backend::{CacheBackend, CacheError, CacheLookup, CacheWrite, NullCache, RemoteCache};
pub use key::CacheKey;
