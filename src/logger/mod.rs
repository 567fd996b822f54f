//! Request-outcome logging.
//!
//! Loggers are side-effecting only: the orchestrator emits one record per
//! call outcome and never lets logger behavior influence the call result,
//! which is why the capability is infallible.

use crate::request::Method;
use crate::Error;
use std::time::Duration;

/// What a completion or error record says about the request.
#[derive(Debug, Clone, Copy)]
pub struct RequestDescriptor<'a> {
    pub method: Method,
    pub uri: &'a str,
}

/// What a completion record says about the response.
#[derive(Debug, Clone, Copy)]
pub struct ResponseDescriptor {
    /// Wall-clock time around the collaborator call (transport, or cache
    /// lookup on the hit path).
    pub elapsed: Duration,
    /// True when the call was satisfied from cache without a transport call.
    pub cache_hit: bool,
}

impl ResponseDescriptor {
    pub fn completed(elapsed: Duration) -> Self {
        Self {
            elapsed,
            cache_hit: false,
        }
    }

    pub fn cache_hit(elapsed: Duration) -> Self {
        Self {
            elapsed,
            cache_hit: true,
        }
    }
}

/// Capability contract for recording call outcomes. Fire-and-forget.
pub trait Logger: Send + Sync {
    fn info(&self, request: RequestDescriptor<'_>, response: ResponseDescriptor);
    fn error(&self, request: RequestDescriptor<'_>, error: &Error);
}

/// How chatty the default logger is. An explicit construction-time option;
/// there is no process-global flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Emit completion and error records.
    #[default]
    Normal,
    /// Suppress completion records; error records are always emitted.
    Quiet,
}

/// Default logger backed by `tracing`.
pub struct ConsoleLogger {
    verbosity: Verbosity,
}

impl ConsoleLogger {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new(Verbosity::Normal)
    }
}

fn completion_line(request: RequestDescriptor<'_>, response: ResponseDescriptor) -> String {
    let suffix = if response.cache_hit { " (cache hit)" } else { "" };
    format!(
        "SERVICE REQUEST COMPLETE :: {} {} {}ms{}",
        request.method,
        request.uri,
        response.elapsed.as_millis(),
        suffix
    )
}

fn error_line(request: RequestDescriptor<'_>, error: &Error) -> String {
    format!(
        "SERVICE REQUEST ERROR :: {} {} {}",
        request.method, request.uri, error
    )
}

impl Logger for ConsoleLogger {
    fn info(&self, request: RequestDescriptor<'_>, response: ResponseDescriptor) {
        if self.verbosity == Verbosity::Quiet {
            return;
        }
        tracing::info!("{}", completion_line(request, response));
    }

    fn error(&self, request: RequestDescriptor<'_>, error: &Error) {
        tracing::error!("{}", error_line(request, error));
    }
}
