//! Logging abstraction for components that report rather than fail.
//!
//! The event bus reports a panicking handler instead of returning it to
//! the publisher. It logs through an injected [`Logger`] so tests can
//! observe what was reported.
//!
//! - `Logger` trait: what components depend on
//! - `TracingLogger`: delegates to the `tracing` crate
//! - `NoOpLogger`: discards everything
//! - `RecordingLogger`: keeps messages in memory for assertions
//!
//! ```
//! use vizlink::log::{Logger, RecordingLogger, LogLevel};
//! use vizlink::log_warn;
//! use std::sync::Arc;
//!
//! let recorder = Arc::new(RecordingLogger::new());
//! let logger: Arc<dyn Logger> = recorder.clone();
//! log_warn!(logger, "handler for '{}' panicked", "status-info");
//! assert_eq!(recorder.count(LogLevel::Warn), 1);
//! ```

mod noop;
mod recording;
mod tracing_adapter;
mod r#trait;

pub use noop::NoOpLogger;
pub use r#trait::{LogLevel, Logger};
pub use recording::{LogRecord, RecordingLogger};
pub use tracing_adapter::TracingLogger;
