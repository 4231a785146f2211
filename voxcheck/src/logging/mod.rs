//! Structured logging infrastructure for voxcheck.
//!
//! The engine itself only emits `tracing` events. This module wires up a
//! subscriber for binaries and tests that want to see them.

#[cfg(test)]
mod tests;

use crate::config::{LogFormat, LogLevel, LoggingConfig};
use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;

/// Error type for logging operations
#[derive(Debug)]
pub enum LogError {
    /// IO error occurred
    IoError(std::io::Error),

    /// Error parsing log level
    InvalidLogLevel(String),

    /// Error in subscriber setup
    SubscriberError(Box<dyn std::error::Error + Send + Sync>),
}

impl From<std::io::Error> for LogError {
    fn from(err: std::io::Error) -> Self {
        LogError::IoError(err)
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for LogError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        LogError::SubscriberError(err)
    }
}

/// Result type for logging operations
pub type Result<T> = std::result::Result<T, LogError>;

/// Initialize the logging system with the given configuration.
///
/// When logging to a file the returned guard must be kept alive for as long
/// as events should be flushed. A subscriber that is already installed is
/// left in place.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let level = log_level_to_level(config.level);

    let (writer, guard) = match (&config.file, config.stdout) {
        (Some(path), false) => {
            let (writer, guard) = create_non_blocking_file(path)?;
            (Some(writer), Some(guard))
        }
        (Some(_), true) => (None, None),
        (None, true) => (None, None),
        (None, false) => return Ok(None),
    };

    let result = match config.format {
        LogFormat::Json => {
            let builder = tracing_subscriber::fmt()
                .json()
                .with_env_filter(env_filter(level))
                .with_target(true)
                .with_line_number(true)
                .with_thread_ids(true);
            match writer {
                Some(writer) => builder.with_writer(writer).try_init(),
                None => builder.try_init(),
            }
        }
        LogFormat::Compact => {
            let builder = tracing_subscriber::fmt()
                .compact()
                .with_env_filter(env_filter(level))
                .with_target(true)
                .with_line_number(true);
            match writer {
                Some(writer) => builder.with_writer(writer).try_init(),
                None => builder.try_init(),
            }
        }
        LogFormat::Pretty => {
            let builder = tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(env_filter(level))
                .with_target(true)
                .with_line_number(true);
            match writer {
                Some(writer) => builder.with_writer(writer).try_init(),
                None => builder.try_init(),
            }
        }
        LogFormat::Default => {
            let builder = tracing_subscriber::fmt()
                .with_env_filter(env_filter(level))
                .with_target(true);
            match writer {
                Some(writer) => builder.with_writer(writer).try_init(),
                None => builder.try_init(),
            }
        }
    };

    if config.file.is_some() && config.stdout {
        tracing::warn!("Configured for stdout only; file logging ignored");
    }

    match result {
        Ok(()) => Ok(guard),
        // A global subscriber is already installed (tests, embedding apps)
        Err(e) if is_already_initialized(e.as_ref()) => Ok(guard),
        Err(e) => Err(LogError::SubscriberError(e)),
    }
}

fn is_already_initialized(err: &(dyn std::error::Error + Send + Sync)) -> bool {
    let message = err.to_string();
    message.contains("global default") || message.contains("already")
}

/// `RUST_LOG` wins over the configured level when set.
fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

/// Create a non-blocking file writer.
fn create_non_blocking_file(path: impl AsRef<Path>) -> Result<(NonBlocking, WorkerGuard)> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| LogError::IoError(std::io::Error::other("log file path has no file name")))?;

    let file_appender = tracing_appender::rolling::never(
        path.parent().unwrap_or_else(|| Path::new(".")),
        file_name,
    );

    Ok(tracing_appender::non_blocking(file_appender))
}

/// Parse a log level string into a LogLevel enum.
pub fn parse_log_level(level: &str) -> Result<LogLevel> {
    level.parse().map_err(|_| LogError::InvalidLogLevel(level.to_string()))
}

/// Convert a LogLevel into the matching tracing::Level.
pub fn log_level_to_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Trace => Level::TRACE,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Info => Level::INFO,
        LogLevel::Warn => Level::WARN,
        LogLevel::Error => Level::ERROR,
    }
}

/// Convert a tracing::Level to a LogLevel enum.
pub fn level_to_log_level(level: Level) -> LogLevel {
    match level {
        Level::TRACE => LogLevel::Trace,
        Level::DEBUG => LogLevel::Debug,
        Level::INFO => LogLevel::Info,
        Level::WARN => LogLevel::Warn,
        Level::ERROR => LogLevel::Error,
    }
}

impl std::fmt::Display for LogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogError::IoError(e) => write!(f, "IO error: {}", e),
            LogError::SubscriberError(e) => write!(f, "Subscriber error: {}", e),
            LogError::InvalidLogLevel(s) => write!(f, "Invalid log level: {}", s),
        }
    }
}

impl std::error::Error for LogError {}
