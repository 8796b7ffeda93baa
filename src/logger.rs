//! # Diagnostic sink
//!
//! The registry reports through an optional [`Logger`]: a verbosity threshold
//! plus a `comment(level, component, message)` entry point. Callers that just
//! want structured logs attach a [`TracingLogger`], which turns comments into
//! [`tracing`] events; any other sink (a processing log file, a test recorder)
//! only has to implement the trait.
//!
//! Levels follow the usual convention of GNSS processing logs: `0` is a
//! warning that is always worth reporting, higher levels are increasingly
//! chatty.

/// Optional diagnostic sink held (weakly) by the registry.
pub trait Logger: Send + Sync {
    /// Verbosity threshold; a message of level `n` is only emitted when `verbosity() >= n`.
    fn verbosity(&self) -> u8;

    fn comment(&self, level: u8, component: &str, message: &str);
}

/// [`Logger`] forwarding every comment to [`tracing`].
///
/// | level | event |
/// |-------|-------|
/// | 0 | `warn`  |
/// | 1 | `info`  |
/// | 2 | `debug` |
/// | ≥3 | `trace` |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracingLogger {
    verbosity: u8,
}

impl TracingLogger {
    pub fn new(verbosity: u8) -> Self {
        TracingLogger { verbosity }
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        TracingLogger::new(1)
    }
}

impl Logger for TracingLogger {
    fn verbosity(&self) -> u8 {
        self.verbosity
    }

    fn comment(&self, level: u8, component: &str, message: &str) {
        match level {
            0 => tracing::warn!(component, "{message}"),
            1 => tracing::info!(component, "{message}"),
            2 => tracing::debug!(component, "{message}"),
            _ => tracing::trace!(component, "{message}"),
        }
    }
}
