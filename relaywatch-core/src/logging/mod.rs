//! Diagnostics setup for the library and the binary.
//!
//! The dashboard owns the terminal while it runs, so diagnostics either go to
//! stderr (one-shot commands) or to a file through a non-blocking writer. The
//! engine's own events can additionally be routed into the event stream with an
//! [`EngineLogLayer`](crate::router::EngineLogLayer).


use crate::router::EngineLogLayer;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{Builder, Rotation};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// Human readable text.
    Pretty,
    /// One JSON object per line with the event fields flattened.
    Json,
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log file path {path}")]
    InvalidPath { path: PathBuf },

    #[error("failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: tracing_appender::rolling::InitError,
    },

    #[error("a global logger is already installed: {0}")]
    AlreadyInstalled(#[from] tracing_subscriber::util::TryInitError),
}

pub fn default_log_mode() -> LogMode {
    if io::stderr().is_terminal() {
        LogMode::Pretty
    } else {
        LogMode::Json
    }
}

/// Filter from `RUST_LOG`, `info` when unset or invalid.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Builds the subscriber without installing it.
///
/// With `file` set, output is appended to that file by a background writer; the
/// returned guard flushes it when dropped and must outlive the program's logging.
pub fn build_subscriber(
    mode: LogMode,
    file: Option<&Path>,
    engine: Option<EngineLogLayer>,
) -> Result<(impl Subscriber + Send + Sync + 'static, Option<WorkerGuard>), LoggingError> {
    let (writer, guard, ansi) = match file {
        Some(path) => {
            let (writer, guard) = file_writer(path)?;
            (writer, Some(guard), false)
        }
        None => (
            BoxMakeWriter::new(io::stderr),
            None,
            io::stderr().is_terminal(),
        ),
    };

    let output: Box<dyn Layer<Registry> + Send + Sync> = match mode {
        LogMode::Pretty => fmt::layer().with_writer(writer).with_ansi(ansi).boxed(),
        LogMode::Json => fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(writer)
            .boxed(),
    };

    let subscriber = tracing_subscriber::registry()
        .with(output)
        .with(engine)
        .with(env_filter());

    Ok((subscriber, guard))
}

/// Installs the global subscriber. See [`build_subscriber`].
pub fn init_logging(
    mode: LogMode,
    file: Option<&Path>,
    engine: Option<EngineLogLayer>,
) -> Result<Option<WorkerGuard>, LoggingError> {
    let (subscriber, guard) = build_subscriber(mode, file, engine)?;
    subscriber.try_init()?;
    Ok(guard)
}

fn file_writer(path: &Path) -> Result<(BoxMakeWriter, WorkerGuard), LoggingError> {
    let invalid = || LoggingError::InvalidPath {
        path: path.to_path_buf(),
    };
    let name = path.file_name().and_then(|n| n.to_str()).ok_or_else(invalid)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let appender = Builder::new()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(dir)
        .map_err(|source| LoggingError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    let (writer, guard) = tracing_appender::non_blocking(appender);
    Ok((BoxMakeWriter::new(writer), guard))
}
