//! Client surface: the builder that resolves backend modules from
//! configuration and the orchestrator that dispatches calls through them.
//!
//! Developer-friendly goal: keep the public surface small and predictable.
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod core;

pub use builder::{CacheModule, LoggerModule, TransportModule};
pub use core::{ClientStats, ServiceClient};
