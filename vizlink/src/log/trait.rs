//! The [`Logger`] trait and its level type.

use std::fmt::{self, Arguments};

/// Severity of a reported message, least severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Per-publish detail
    Trace,
    /// Bind and subscribe detail
    Debug,
    /// Session lifecycle
    Info,
    /// A handler or load went wrong but the caller carried on
    Warn,
    /// Surfaced to the user
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sink for messages a component reports instead of returning.
///
/// One logger is shared behind an `Arc` by everything a session owns,
/// hence `Send + Sync`.
pub trait Logger: Send + Sync {
    /// Record one message.
    fn log(&self, level: LogLevel, args: Arguments<'_>);

    /// Whether messages at `level` are kept at all. Callers may skip
    /// formatting when this is `false`.
    fn enabled(&self, _level: LogLevel) -> bool {
        true
    }

    fn info(&self, args: Arguments<'_>) {
        self.log(LogLevel::Info, args);
    }

    fn warn(&self, args: Arguments<'_>) {
        self.log(LogLevel::Warn, args);
    }

    fn error(&self, args: Arguments<'_>) {
        self.log(LogLevel::Error, args);
    }
}

/// Report through a [`Logger`] at an explicit level, formatting lazily.
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr, $($arg:tt)*) => {{
        let level = $level;
        if $logger.enabled(level) {
            $logger.log(level, format_args!($($arg)*));
        }
    }};
}

/// Report a warning through a [`Logger`].
#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log_at!($logger, $crate::log::LogLevel::Warn, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::{NoOpLogger, RecordingLogger};

    #[test]
    fn test_levels_order_by_severity() {
        let mut levels = vec![LogLevel::Error, LogLevel::Trace, LogLevel::Warn, LogLevel::Info];
        levels.sort();
        assert_eq!(
            levels,
            vec![LogLevel::Trace, LogLevel::Info, LogLevel::Warn, LogLevel::Error]
        );
        assert_eq!(LogLevel::Warn.to_string(), "WARN");
    }

    #[test]
    fn test_log_at_skips_disabled_levels() {
        let recorder = RecordingLogger::new();
        crate::log_at!(recorder, LogLevel::Debug, "bound {} types", 3);
        assert_eq!(recorder.count(LogLevel::Debug), 1);

        // Arguments are never formatted for a logger that keeps nothing
        struct Loud;
        impl fmt::Display for Loud {
            fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
                panic!("formatted a dropped message")
            }
        }
        crate::log_warn!(NoOpLogger, "{}", Loud);
    }
}
