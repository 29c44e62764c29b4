//! Leveled logging capability
//!
//! The pipeline and bootstrap never log through a process-wide handle; they
//! are handed a [`Logger`]. [`TracingLogger`] forwards to `tracing`, whose
//! subscriber adds the timestamp and the colored level. [`MemoryLogger`]
//! keeps entries in memory so callers can inspect what was reported.

use std::fmt;
use std::sync::Mutex;

/// Severity of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Progress information
    Info,
    /// Something the operator should know about
    Warning,
    /// A stage failed
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Info => write!(f, "LOG"),
            LogLevel::Warning => write!(f, "WARNING"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// Sink for human-readable progress and warnings
pub trait Logger {
    /// Record a message at the given severity
    fn log(&self, level: LogLevel, message: &str);

    /// Record an informational message
    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Record a warning
    fn warn(&self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    /// Record an error
    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

impl<T: Logger + ?Sized> Logger for &T {
    fn log(&self, level: LogLevel, message: &str) {
        (**self).log(level, message);
    }
}

/// Logger backed by the `tracing` macros
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Info => tracing::info!("{message}"),
            LogLevel::Warning => tracing::warn!("{message}"),
            LogLevel::Error => tracing::error!("{message}"),
        }
    }
}

/// Logger that keeps every entry in memory
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLogger {
    /// Create an empty logger
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries recorded so far, oldest first
    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Messages recorded at the given level
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message)
            .collect()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: LogLevel, message: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push((level, message.to_string()));
        }
    }
}
