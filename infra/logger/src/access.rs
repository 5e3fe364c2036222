//! Append-only request access log.
//!
//! Request handlers never touch the file: they push an [`AccessEntry`] into a bounded
//! channel through an [`AccessLog`] handle, and a single background task appends the
//! entries in arrival order. A write failure is reported through `tracing` and the entry
//! is dropped; the request that produced it is never affected.

use crate::error::LoggerError;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

const DEFAULT_CAPACITY: usize = 1024;
const DEFAULT_FILE: &str = "access.log";

/// One access log line: `<ISO-8601 timestamp> - <METHOD> <PATH>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessEntry {
    pub timestamp: DateTime<Utc>,
    pub method: String,
    pub path: String,
}

impl AccessEntry {
    /// Creates an entry stamped with the current time.
    pub fn now(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self { timestamp: Utc::now(), method: method.into(), path: path.into() }
    }
}

impl fmt::Display for AccessEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.method,
            self.path
        )
    }
}

/// Cloneable handle used to enqueue entries for the writer task.
#[derive(Debug, Clone)]
pub struct AccessLog {
    sender: mpsc::Sender<AccessEntry>,
}

impl AccessLog {
    /// Returns a new [`AccessLogBuilder`].
    pub fn builder() -> AccessLogBuilder {
        AccessLogBuilder::default()
    }

    /// Enqueues an entry without waiting.
    ///
    /// A saturated buffer or a stopped writer drops the entry with a warning.
    pub fn record(&self, entry: AccessEntry) {
        match self.sender.try_send(entry) {
            Ok(()) => {},
            Err(TrySendError::Full(entry)) => {
                warn!(method = %entry.method, path = %entry.path, "Access log buffer full, entry dropped");
            },
            Err(TrySendError::Closed(entry)) => {
                warn!(method = %entry.method, path = %entry.path, "Access log writer stopped, entry dropped");
            },
        }
    }
}

/// Configures and spawns the access log writer.
#[must_use = "builders do nothing unless you call .spawn()"]
#[derive(Debug)]
pub struct AccessLogBuilder {
    path: PathBuf,
    capacity: usize,
}

impl Default for AccessLogBuilder {
    fn default() -> Self {
        Self { path: PathBuf::from(DEFAULT_FILE), capacity: DEFAULT_CAPACITY }
    }
}

impl AccessLogBuilder {
    /// Sets the file entries are appended to.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets how many entries may wait for the writer.
    pub const fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Spawns the writer task on the current tokio runtime.
    ///
    /// The file is opened lazily for every entry, so a missing file (or one removed by
    /// log rotation) is recreated on the next request.
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] for a zero capacity or an empty path.
    ///
    /// # Panics
    /// Panics when called outside of a tokio runtime.
    pub fn spawn(self) -> Result<(AccessLog, AccessLogWorker), LoggerError> {
        if self.capacity == 0 {
            return Err(LoggerError::InvalidConfiguration {
                message: "access log capacity must be greater than zero".into(),
                context: None,
            });
        }
        if self.path.as_os_str().is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "access log path cannot be empty".into(),
                context: None,
            });
        }

        let (sender, receiver) = mpsc::channel(self.capacity);
        let path = self.path;
        debug!(path = %path.display(), capacity = self.capacity, "Spawning access log writer");

        let handle = tokio::spawn(write_entries(path.clone(), receiver));

        Ok((AccessLog { sender }, AccessLogWorker { path, handle }))
    }
}

/// The background writer. Finishes once every [`AccessLog`] handle is dropped.
#[must_use = "dropping the worker detaches the writer; call .finish() to flush on shutdown"]
#[derive(Debug)]
pub struct AccessLogWorker {
    path: PathBuf,
    handle: JoinHandle<()>,
}

impl AccessLogWorker {
    /// The file this worker appends to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Waits until all queued entries are written.
    ///
    /// Only completes after the last [`AccessLog`] handle has been dropped.
    pub async fn finish(self) {
        if let Err(e) = self.handle.await {
            error!(path = %self.path.display(), "Access log writer terminated abnormally: {e}");
        }
    }
}

async fn write_entries(path: PathBuf, mut receiver: mpsc::Receiver<AccessEntry>) {
    while let Some(entry) = receiver.recv().await {
        if let Err(e) = append_line(&path, &entry).await {
            error!(path = %path.display(), "Failed to write access log entry: {e}");
        }
    }
    debug!(path = %path.display(), "Access log writer drained");
}

async fn append_line(path: &Path, entry: &AccessEntry) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path).await?;
    file.write_all(format!("{entry}\n").as_bytes()).await?;
    file.flush().await
}
