//! Tracing subscriber setup

use std::ffi::OsStr;
use std::path::Path;

use thiserror::Error;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

use crate::config::{LogConfig, LogFormat, log_path};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to open log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to install subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// RUST_LOG wins over the configured level
pub fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Opens a non-blocking writer appending to `path`, creating parent directories
pub fn file_writer(path: &Path) -> Result<(NonBlocking, WorkerGuard), LoggingError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;
    let file_name = path
        .file_name()
        .unwrap_or_else(|| OsStr::new("version-gatherer.log"));

    let appender = tracing_appender::rolling::never(dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}

/// Installs the global subscriber.
///
/// Logs go to stderr unless `to_file` is set. The returned guard must be
/// kept alive for buffered file output to be flushed.
pub fn init(config: &LogConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let (writer, guard) = if config.to_file {
        let (writer, guard) = file_writer(&log_path())?;
        (BoxMakeWriter::new(writer), Some(guard))
    } else {
        (BoxMakeWriter::new(std::io::stderr), None)
    };

    let layer = match config.format {
        LogFormat::Text => fmt::layer()
            .with_writer(writer)
            .with_ansi(!config.to_file)
            .boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(writer).boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(env_filter(config))
        .try_init()?;

    Ok(guard)
}
