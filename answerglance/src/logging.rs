//! Logging infrastructure.
//!
//! Structured logging with dual output: a log file under the configured
//! directory plus stdout for interactive use. Verbosity is controlled via
//! the `RUST_LOG` environment variable (default: `info`).

use std::fs;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard flushes and closes the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Initialize the global logging subscriber.
///
/// Creates the log directory if needed and truncates any previous log file
/// so each session starts clean.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or the log file
/// cannot be truncated. Calling this twice in one process also fails, since
/// the global subscriber can only be installed once.
pub fn init_logging(log_dir: &Path, log_file: &str) -> Result<LoggingGuard, io::Error> {
    fs::create_dir_all(log_dir)?;
    fs::write(log_dir.join(log_file), "")?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_ansi(true);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
        .map_err(|err| io::Error::other(err.to_string()))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}
