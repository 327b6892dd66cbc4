//! [`Logger`] backed by `tracing`.

use std::fmt::Arguments;

use crate::log::{LogLevel, Logger};

/// Forwards to the `tracing` macros under the `vizlink` target, so
/// messages land wherever [`crate::logging::init_logging`] sent them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        match level {
            LogLevel::Trace => tracing::trace!(target: "vizlink", "{}", args),
            LogLevel::Debug => tracing::debug!(target: "vizlink", "{}", args),
            LogLevel::Info => tracing::info!(target: "vizlink", "{}", args),
            LogLevel::Warn => tracing::warn!(target: "vizlink", "{}", args),
            LogLevel::Error => tracing::error!(target: "vizlink", "{}", args),
        }
    }
}
