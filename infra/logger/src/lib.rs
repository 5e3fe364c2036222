//! # Logger
//!
//! Two independent sinks for the contact service:
//!
//! * [`Logger`] installs the global `tracing` subscriber. Diagnostics always go to the
//!   console; a daily rolling file (plain or JSON lines) is added when a directory is set.
//! * [`AccessLog`] appends one line per HTTP request from a background task, so request
//!   handling never waits on the disk.
//!
//! ```rust
//! use agenda_logger::Logger;
//!
//! let _logger = Logger::builder().name("agenda").filter("agenda=debug").init().unwrap();
//! tracing::info!("ready");
//! ```

mod access;
mod error;

pub use crate::access::{AccessEntry, AccessLog, AccessLogBuilder, AccessLogWorker};
pub use crate::error::{LoggerError, LoggerErrorExt};

use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Rolling files kept on disk before the oldest is removed.
const RETAINED_FILES: usize = 14;

/// Marker: no name given yet.
#[derive(Debug)]
pub struct Unnamed;
/// Marker: the name that prefixes rolling files.
#[derive(Debug)]
pub struct Named(String);

/// Builder for the global subscriber. [`init`](LoggerBuilder::init) needs a name first.
#[must_use = "call .init() to install the subscriber"]
#[derive(Debug)]
pub struct LoggerBuilder<N = Unnamed> {
    name: N,
    filter: Option<String>,
    directory: Option<PathBuf>,
    json: bool,
}

impl LoggerBuilder<Unnamed> {
    /// Names the application; rolling files are called `<name>.<date>.log`.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<Named> {
        LoggerBuilder {
            name: Named(name.into()),
            filter: self.filter,
            directory: self.directory,
            json: self.json,
        }
    }
}

impl<N> LoggerBuilder<N> {
    /// Filter directive such as `info` or `agenda=debug,tower_http=warn`.
    ///
    /// Ignored when `RUST_LOG` is set.
    pub fn filter(mut self, directive: impl Into<String>) -> Self {
        self.filter = Some(directive.into());
        self
    }

    /// Also writes daily rolling files into `directory` when `Some`.
    pub fn directory(mut self, directory: Option<impl Into<PathBuf>>) -> Self {
        self.directory = directory.map(Into::into);
        self
    }

    /// Writes the rolling files as JSON lines. The console stays human-readable.
    pub const fn json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }
}

impl LoggerBuilder<Named> {
    /// Installs the subscriber for the rest of the process.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for a blank name or an unparsable filter.
    /// * [`LoggerError::Internal`] if the log directory cannot be created.
    /// * [`LoggerError::Appender`] if the rolling file cannot be opened.
    /// * [`LoggerError::Subscriber`] if a subscriber is already installed.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let Named(name) = self.name;
        if name.trim().is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "Logger name cannot be empty".into(),
                context: None,
            });
        }

        let filter = resolve_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok(), self.filter)?;
        let console = fmt::layer().compact().with_ansi(true).boxed();

        let (file, guard) = match self.directory {
            Some(directory) => {
                let (layer, guard) = file_layer(&name, directory, self.json)?;
                (Some(layer), Some(guard))
            },
            None => (None, None),
        };

        tracing_subscriber::registry()
            .with(filter)
            .with(console)
            .with(file)
            .try_init()
            .map_err(LoggerError::from)
            .context("Installing global subscriber")?;

        Ok(Logger { guard })
    }
}

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync>;

fn file_layer<S>(
    name: &str,
    directory: PathBuf,
    json: bool,
) -> Result<(BoxedLayer<S>, WorkerGuard), LoggerError>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    std::fs::create_dir_all(&directory).map_err(|e| LoggerError::Internal {
        message: e.to_string().into(),
        context: Some(format!("Creating log directory {}", directory.display()).into()),
    })?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(name)
        .filename_suffix("log")
        .max_log_files(RETAINED_FILES)
        .build(&directory)
        .map_err(LoggerError::from)
        .context(format!("Opening log directory {}", directory.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(appender);
    let layer = fmt::layer().with_writer(writer).with_ansi(false);
    let layer = if json { layer.json().boxed() } else { layer.boxed() };

    Ok((layer, guard))
}

/// `RUST_LOG` wins over the configured directive; with neither, `info` and above.
fn resolve_filter(env: Option<String>, configured: Option<String>) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(LevelFilter::INFO.into());

    match (env, configured) {
        (Some(env), _) => Ok(builder.parse_lossy(env)),
        (None, Some(directive)) => builder.parse(&directive).map_err(|e| {
            LoggerError::InvalidConfiguration {
                message: format!("Invalid filter '{directive}': {e}").into(),
                context: None,
            }
        }),
        (None, None) => Ok(builder.parse_lossy("")),
    }
}

/// Keeps the file writer alive; buffered lines are flushed when it drops.
#[must_use = "dropping the logger stops the file writer"]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { name: Unnamed, filter: None, directory: None, json: false }
    }

    /// Whether a rolling file is being written.
    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::debug!("Flushing log files");
        }
    }
}
