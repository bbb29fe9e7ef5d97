//! Logging infrastructure for NAVDEN.
//!
//! Provides structured logging with file output and optional console output:
//! - Writes to `~/.navden/navden.log` by default (cleared on session start)
//! - Optionally prints to stdout; the CLI turns this off under the TUI
//! - Configurable via the RUST_LOG environment variable

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard will flush and close the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Initialize logging with file and stdout output at `info` level.
pub fn init_logging(log_dir: &str, log_file: &str) -> Result<LoggingGuard, io::Error> {
    init_logging_full(log_dir, log_file, true, false)
}

/// Initialize the logging system.
///
/// Creates the log directory if needed, clears the previous log file,
/// and installs the global subscriber.
///
/// # Arguments
///
/// * `log_dir` - Directory for the log file
/// * `log_file` - Log filename (e.g., "navden.log")
/// * `stdout_enabled` - Also write to stdout
/// * `debug` - Force `debug` level, ignoring RUST_LOG
///
/// # Errors
///
/// Returns error if the log directory cannot be created or the log file cannot be cleared
pub fn init_logging_full(
    log_dir: &str,
    log_file: &str,
    stdout_enabled: bool,
    debug: bool,
) -> Result<LoggingGuard, io::Error> {
    prepare_log_file(Path::new(log_dir), log_file)?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_span_events(FmtSpan::CLOSE)
        .pretty();

    let stdout_layer = stdout_enabled.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stdout)
            .with_ansi(true)
            .compact()
    });

    tracing_subscriber::registry()
        .with(build_filter(debug))
        .with(file_layer)
        .with(stdout_layer)
        .init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// `debug` when forced, otherwise RUST_LOG, falling back to `info`.
fn build_filter(debug: bool) -> EnvFilter {
    if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Create `log_dir` and truncate `log_dir/log_file`.
fn prepare_log_file(log_dir: &Path, log_file: &str) -> Result<PathBuf, io::Error> {
    fs::create_dir_all(log_dir)?;
    let log_path = log_dir.join(log_file);
    fs::write(&log_path, "")?;
    Ok(log_path)
}

/// Get default log file name.
pub fn default_log_file() -> &'static str {
    crate::config::defaults::DEFAULT_LOG_FILE_NAME
}
