//! Output destinations for rendered run-log lines.
//!
//! Every [`Sink`] receives complete lines (header and trailing newline
//! included). Sinks serialize their own writes; the router above them only
//! decides which sinks a line goes to.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::LoggingError;

/// Owner read/write, group and others read.
#[cfg(unix)]
const LOG_FILE_MODE: u32 = 0o644;

pub trait Sink: Send + Sync + fmt::Debug {
    /// Write one rendered line.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error. Callers on the logging path drop it.
    fn write_line(&self, line: &str) -> io::Result<()>;
}

fn lock_recovering<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The process error stream.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleSink;

impl ConsoleSink {
    #[must_use]
    pub const fn stderr() -> Self {
        Self
    }
}

impl Sink for ConsoleSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut handle = io::stderr().lock();
        handle.write_all(line.as_bytes())?;
        handle.flush()
    }
}

/// Append-mode log file. The handle is owned here and closed at most once.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl FileSink {
    /// Open (creating if needed) `path` for appending.
    ///
    /// # Errors
    ///
    /// Returns [`LoggingError::OpenLogFile`] when the file cannot be opened or
    /// created.
    pub fn open(path: &Path) -> Result<Self, LoggingError> {
        let mut options = OpenOptions::new();
        options.read(true).create(true).append(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(LOG_FILE_MODE);
        }
        let file = options
            .open(path)
            .map_err(|source| LoggingError::OpenLogFile {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!("Opened run log file {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(Some(file)),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        lock_recovering(&self.file).is_some()
    }

    /// Release the handle. Returns `false` when it was already released.
    pub fn close(&self) -> bool {
        let Some(file) = lock_recovering(&self.file).take() else {
            return false;
        };
        if let Err(err) = file.sync_all() {
            tracing::debug!("Failed to sync run log file on close: {}", err);
        }
        drop(file);
        true
    }
}

impl Sink for FileSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut guard = lock_recovering(&self.file);
        match guard.as_mut() {
            Some(file) => file.write_all(line.as_bytes()),
            None => Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "run log file already closed",
            )),
        }
    }
}

/// Writes every line to both sinks, primary first.
#[derive(Debug, Clone)]
pub struct TeeSink {
    primary: Arc<dyn Sink>,
    secondary: Arc<dyn Sink>,
}

impl TeeSink {
    #[must_use]
    pub fn new(primary: Arc<dyn Sink>, secondary: Arc<dyn Sink>) -> Self {
        Self { primary, secondary }
    }
}

impl Sink for TeeSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let primary = self.primary.write_line(line);
        let secondary = self.secondary.write_line(line);
        primary.and(secondary)
    }
}

/// Collects lines in memory, for callers that inspect output afterwards.
#[derive(Debug, Default)]
pub struct MemorySink {
    buffer: Mutex<String>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contents(&self) -> String {
        lock_recovering(&self.buffer).clone()
    }

    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        lock_recovering(&self.buffer)
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

impl Sink for MemorySink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        lock_recovering(&self.buffer).push_str(line);
        Ok(())
    }
}
