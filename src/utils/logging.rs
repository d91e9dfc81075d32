//! Logging system initialization
//!
//! Sets up tracing-based logging to the console and to `gsms.log` in the log
//! directory (%LOCALAPPDATA%\gsms by default), with rotation on startup
//! keeping 10 historical files.

use crate::error::{GsmsError, Result, StringError};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Maximum number of historical log files to keep (gsms.log.1 through gsms.log.9)
const MAX_LOG_FILES: u8 = 9;

/// Log file name prefix and suffix
const LOG_PREFIX: &str = "gsms";
const LOG_SUFFIX: &str = "log";

/// Get the default log directory
///
/// Returns: %LOCALAPPDATA%\gsms
pub fn default_log_dir() -> PathBuf {
    let local_app_data = std::env::var("LOCALAPPDATA").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(local_app_data).join("gsms")
}

/// Initialize the logging system
///
/// Log level defaults to INFO (DEBUG with `verbose`) but `RUST_LOG` wins when set.
/// Rotates existing logs on startup to maintain a history of the last 10 runs.
pub fn init_logging(log_dir: &Path, verbose: bool) -> Result<()> {
    std::fs::create_dir_all(log_dir)?;

    // Rotate existing log files on startup
    let log_path = log_dir.join(format!("{LOG_PREFIX}.{LOG_SUFFIX}"));
    rotate_logs_on_startup(&log_path)?;

    // RollingFileAppender has no startup rotation, so rotation is handled above
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER) // Rotated on startup instead
        .filename_prefix(LOG_PREFIX)
        .filename_suffix(LOG_SUFFIX)
        .build(log_dir)
        .map_err(|e| {
            // Keep the appender error as the source
            GsmsError::LoggingError(Box::new(e))
        })?;

    // RUST_LOG overrides the verbosity flag
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Console output is what a user running the tool reads
    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false) // Plain messages, no module paths
        .without_time();

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false) // Disable ANSI colors for file output
        .with_target(true) // Include target module
        .with_file(true) // Include file names
        .with_line_number(true); // Include line numbers

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| GsmsError::LoggingError(Box::new(e)))?;

    tracing::debug!("gsms v{} started, logging to {}", env!("CARGO_PKG_VERSION"), log_path.display());

    Ok(())
}

/// Rotate log files on startup
///
/// - gsms.log.9 is deleted (oldest log)
/// - gsms.log.8 -> gsms.log.9, ..., gsms.log.1 -> gsms.log.2
/// - gsms.log -> gsms.log.1
/// - A fresh gsms.log is created by the logger
fn rotate_logs_on_startup(log_path: &Path) -> Result<()> {
    // No previous run, nothing to rotate
    if !log_path.exists() {
        return Ok(());
    }

    let log_dir = log_path
        .parent()
        .ok_or_else(|| GsmsError::LoggingError(StringError::new("Invalid log path")))?;

    let log_name = log_path
        .file_name()
        .ok_or_else(|| GsmsError::LoggingError(StringError::new("Invalid log filename")))?
        .to_string_lossy();

    // Drop the oldest log (gsms.log.9) to make room
    let oldest_log = log_dir.join(format!("{log_name}.{MAX_LOG_FILES}"));
    if oldest_log.exists() {
        std::fs::remove_file(&oldest_log)?;
    }

    // Shift the numbered logs up by one, newest last:
    // gsms.log.8 -> gsms.log.9, ..., gsms.log.1 -> gsms.log.2
    for i in (1..MAX_LOG_FILES).rev() {
        let current_log = log_dir.join(format!("{log_name}.{i}"));
        let next_log = log_dir.join(format!("{log_name}.{}", i + 1));

        if current_log.exists() {
            std::fs::rename(&current_log, &next_log)?;
        }
    }

    // The previous run's log becomes gsms.log.1
    std::fs::rename(log_path, log_dir.join(format!("{log_name}.1")))?;

    Ok(())
}
