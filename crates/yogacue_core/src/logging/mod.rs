//! Logging infrastructure for YogaCue.
//!
//! This module provides:
//! - Global `tracing` subscriber setup honouring `RUST_LOG`
//! - Optional daily-rolling log file via `tracing-appender`
//! - Message prefixes for stage markers
//!
//! # Example
//!
//! ```no_run
//! use yogacue_core::config::Settings;
//! use yogacue_core::logging::init_tracing;
//!
//! let settings = Settings::default();
//! // Keep the guard alive for the lifetime of the process
//! let _guard = init_tracing(&settings.logging, &settings.paths.logs_folder);
//! tracing::info!("ready");
//! ```

mod types;

pub use types::{LogLevel, MessagePrefix};

use std::path::Path;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingSettings;

/// File name prefix of rolling log files.
const LOG_FILE_PREFIX: &str = "yogacue.log";

/// Initialize global tracing subscriber for application-wide logging.
///
/// This sets up a subscriber that:
/// - Respects RUST_LOG environment variable
/// - Falls back to the configured level
/// - Outputs to stderr
/// - Optionally appends to a daily log file in `logs_folder`
///
/// Should be called once at application startup. The returned guard flushes
/// the file writer when dropped.
pub fn init_tracing(settings: &LoggingSettings, logs_folder: impl AsRef<Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.level.as_filter_str()));

    let (file_layer, guard) = match file_writer(settings, logs_folder.as_ref()) {
        Some((writer, guard)) => {
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(settings.show_target);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(settings.show_target)
                .with_thread_ids(false),
        )
        .with(file_layer)
        .with(filter)
        .try_init();

    if let Err(e) = result {
        eprintln!("tracing already initialized: {}", e);
    }

    guard
}

/// Daily-rolling file writer, if file logging is enabled.
fn file_writer(settings: &LoggingSettings, logs_folder: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    if !settings.write_file {
        return None;
    }
    let appender = tracing_appender::rolling::daily(logs_folder, LOG_FILE_PREFIX);
    Some(tracing_appender::non_blocking(appender))
}

/// Initialize tracing for tests (only logs warnings and above).
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn no_file_writer_unless_enabled() {
        let dir = tempdir().unwrap();
        let settings = LoggingSettings::default();
        assert!(!settings.write_file);
        assert!(file_writer(&settings, dir.path()).is_none());
    }

    #[test]
    fn file_writer_logs_into_folder() {
        let dir = tempdir().unwrap();
        let settings = LoggingSettings {
            write_file: true,
            ..LoggingSettings::default()
        };

        let (mut writer, guard) = file_writer(&settings, dir.path()).unwrap();
        writer.write_all(b"line\n").unwrap();
        drop(guard);

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert!(names.iter().any(|name| name.starts_with(LOG_FILE_PREFIX)));
    }
}
