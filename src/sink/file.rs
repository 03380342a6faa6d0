//! Append-only file sink.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

use super::LogSink;
use crate::record::LogRecord;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("cannot open log file {path:?} for writing: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

type Echo = Arc<Mutex<dyn Write + Send>>;

/// Appends the dump of every record to a file.
///
/// Clones share the file handle, the echo target and the failure counter.
/// A failed file write or a failed echo each count as one failure.
#[derive(Clone)]
pub struct FileSink {
    path: PathBuf,
    file: Arc<File>,
    echo: Option<Echo>,
    failures: Arc<AtomicU64>,
}

impl FileSink {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| SinkError::Open {
                path: path.clone(),
                source,
            })?;
        tracing::info!(path = %path.display(), "opened log file");
        Ok(Self {
            path,
            file: Arc::new(file),
            echo: None,
            failures: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Also print every dump to stdout.
    pub fn with_echo(self, echo: bool) -> Self {
        if echo {
            self.with_echo_to(io::stdout())
        } else {
            Self { echo: None, ..self }
        }
    }

    /// Also write every dump to `target`.
    pub fn with_echo_to(mut self, target: impl Write + Send + 'static) -> Self {
        self.echo = Some(Arc::new(Mutex::new(target)));
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes that failed since the file was opened.
    pub fn write_failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }
}

impl LogSink for FileSink {
    fn write(&mut self, record: LogRecord) {
        let dump = record.dump();
        if (&*self.file).write_all(dump.as_bytes()).is_err() {
            self.failures.fetch_add(1, Ordering::Relaxed);
        }
        if let Some(echo) = &self.echo {
            let mut target = echo.lock().unwrap_or_else(PoisonError::into_inner);
            if target.write_all(dump.as_bytes()).and_then(|()| target.flush()).is_err() {
                self.failures.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

impl fmt::Debug for FileSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSink")
            .field("path", &self.path)
            .field("echo", &self.echo.is_some())
            .field("failures", &self.write_failures())
            .finish()
    }
}
