use std::fmt;
use std::path::Path;
use std::sync::Arc;

use chrono::Local;

use crate::context::Context;
use crate::error::LoggingError;

use super::builder::LoggerConfig;
use super::fatal::FatalSignal;
use super::format::render_line;
use super::level::{Level, LevelGate};
use super::router::SinkRouter;
use super::sink::{ConsoleSink, FileSink, Sink};

/// Leveled run logger.
///
/// Flags are frozen at construction. When a log file is configured the
/// logger owns its only handle: debug, info and warn lines go to the file,
/// error and fatal lines go to the file and the console.
#[derive(Debug)]
pub struct Logger {
    gate: LevelGate,
    router: SinkRouter,
}

impl Logger {
    /// Build a logger writing to stderr and, optionally, the configured file.
    ///
    /// # Errors
    ///
    /// Returns [`LoggingError::OpenLogFile`] when the log file cannot be
    /// opened or created.
    pub fn from_config(config: &LoggerConfig) -> Result<Self, LoggingError> {
        Self::with_console(config, Arc::new(ConsoleSink::stderr()))
    }

    pub(crate) fn with_console(
        config: &LoggerConfig,
        console: Arc<dyn Sink>,
    ) -> Result<Self, LoggingError> {
        let file = config.log_file_path().map(FileSink::open).transpose()?;
        Ok(Self {
            gate: config.gate(),
            router: SinkRouter::new(console, file),
        })
    }

    #[must_use]
    pub const fn gate(&self) -> LevelGate {
        self.gate
    }

    #[must_use]
    pub const fn debug_enabled(&self) -> bool {
        self.gate.debug
    }

    #[must_use]
    pub const fn info_enabled(&self) -> bool {
        self.gate.info
    }

    #[must_use]
    pub const fn warn_enabled(&self) -> bool {
        self.gate.warn
    }

    #[must_use]
    pub const fn error_enabled(&self) -> bool {
        self.gate.error
    }

    #[must_use]
    pub fn log_file_enabled(&self) -> bool {
        self.router.file().is_some()
    }

    #[must_use]
    pub fn log_file(&self) -> Option<&Path> {
        self.router.file().map(FileSink::path)
    }

    /// Whether the log file handle is still held. `false` without a file.
    #[must_use]
    pub fn log_file_open(&self) -> bool {
        self.router.file().is_some_and(FileSink::is_open)
    }

    pub fn debug(&self, ctx: &Context, args: fmt::Arguments<'_>) {
        self.log(ctx, Level::Debug, args);
    }

    pub fn info(&self, ctx: &Context, args: fmt::Arguments<'_>) {
        self.log(ctx, Level::Info, args);
    }

    pub fn warn(&self, ctx: &Context, args: fmt::Arguments<'_>) {
        self.log(ctx, Level::Warn, args);
    }

    pub fn error(&self, ctx: &Context, args: fmt::Arguments<'_>) {
        self.log(ctx, Level::Error, args);
    }

    /// Gate, render and route one line. Nothing is formatted when the level
    /// is disabled.
    pub fn log(&self, _ctx: &Context, level: Level, args: fmt::Arguments<'_>) {
        if !self.gate.allows(level) {
            return;
        }
        let line = render_line(level, &Local::now(), args);
        self.router.emit(level, &line);
    }

    /// Log an ungated fatal line to the console and the log file, then
    /// release the file. The process keeps running; the returned signal
    /// decides what happens next.
    pub fn fatal(&self, ctx: &Context, args: fmt::Arguments<'_>) -> FatalSignal {
        let message = args.to_string();
        self.log(ctx, Level::Fatal, format_args!("{}", message));
        self.close();
        FatalSignal::new(message)
    }

    /// [`Logger::fatal`] followed by process exit with status 1.
    pub fn fatal_exit(&self, ctx: &Context, args: fmt::Arguments<'_>) -> ! {
        self.fatal(ctx, args).exit()
    }

    /// Release the log file. Safe to call any number of times.
    pub fn close(&self) {
        self.router.close();
    }
}
