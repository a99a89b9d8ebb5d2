//! Structured logging
//!
//! JSON lines on stderr so stdout stays free for operation results.
//! Initialized once per process.

use clap::ValueEnum;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

static INITIALIZED: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// `EnvFilter` directive for this level
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Install the global subscriber. `RUST_LOG` overrides `level` when set.
///
/// Returns the appender guard, which must live until exit so buffered lines
/// are flushed. Later calls do nothing and return `None`.
pub fn init(level: LogLevel) -> Option<WorkerGuard> {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return None;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.directive()));

    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());

    let installed = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_current_span(true)
        .try_init();

    if let Err(e) = installed {
        eprintln!("Logging already configured: {}", e);
        return None;
    }

    tracing::debug!(?level, "logging initialized");
    Some(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(LogLevel::Off.directive(), "off");
        assert_eq!(LogLevel::Info.directive(), "info");
        assert_eq!(LogLevel::Trace.directive(), "trace");
    }

    #[test]
    fn test_init_is_once() {
        let first = init(LogLevel::Off);
        let second = init(LogLevel::Debug);
        assert!(second.is_none());
        drop(first);
    }
}
