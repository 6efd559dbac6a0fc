use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::error::LoggingError;

use super::level::LevelGate;
use super::logger::Logger;
use super::sink::{ConsoleSink, Sink};

/// Run logger settings, as read from the `[logging]` config section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub debug: bool,
    pub info: bool,
    pub warn: bool,
    pub error: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        let gate = LevelGate::default();
        Self {
            debug: gate.debug,
            info: gate.info,
            warn: gate.warn,
            error: gate.error,
            log_file: None,
        }
    }
}

impl LoggerConfig {
    #[must_use]
    pub const fn gate(&self) -> LevelGate {
        LevelGate {
            debug: self.debug,
            info: self.info,
            warn: self.warn,
            error: self.error,
        }
    }

    /// Configured log file, treating an empty path as "console only".
    #[must_use]
    pub fn log_file_path(&self) -> Option<&Path> {
        self.log_file
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }
}

/// Fluent front end over [`LoggerConfig`].
///
/// ```
/// use ocm_load::logging::LoggerBuilder;
///
/// let logger = LoggerBuilder::new().debug(true).warn(false).build()?;
/// assert!(logger.debug_enabled());
/// assert!(!logger.log_file_enabled());
/// # Ok::<(), ocm_load::error::LoggingError>(())
/// ```
#[derive(Debug, Default)]
pub struct LoggerBuilder {
    config: LoggerConfig,
    console: Option<Arc<dyn Sink>>,
}

impl LoggerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn debug(mut self, flag: bool) -> Self {
        self.config.debug = flag;
        self
    }

    #[must_use]
    pub fn info(mut self, flag: bool) -> Self {
        self.config.info = flag;
        self
    }

    #[must_use]
    pub fn warn(mut self, flag: bool) -> Self {
        self.config.warn = flag;
        self
    }

    #[must_use]
    pub fn error(mut self, flag: bool) -> Self {
        self.config.error = flag;
        self
    }

    #[must_use]
    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_file = Some(path.into());
        self
    }

    /// Replace the console destination (stderr by default).
    #[must_use]
    pub fn console(mut self, sink: Arc<dyn Sink>) -> Self {
        self.console = Some(sink);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Freeze the configuration into a [`Logger`], opening the log file if
    /// one was set.
    ///
    /// # Errors
    ///
    /// Returns [`LoggingError::OpenLogFile`] when the log file cannot be
    /// opened or created.
    pub fn build(self) -> Result<Logger, LoggingError> {
        let console = self
            .console
            .unwrap_or_else(|| Arc::new(ConsoleSink::stderr()));
        Logger::with_console(&self.config, console)
    }
}

impl From<LoggerConfig> for LoggerBuilder {
    fn from(config: LoggerConfig) -> Self {
        Self {
            config,
            console: None,
        }
    }
}
