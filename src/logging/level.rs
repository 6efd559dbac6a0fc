use std::fmt;

/// Severity of a run-log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    /// Header tag written in front of every line of this severity.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Level::Debug => "[DEBUG]",
            Level::Info => "[INFO]",
            Level::Warn => "[WARN]",
            Level::Error => "[ERROR]",
            Level::Fatal => "[FATAL]",
        }
    }

    /// Lines of this severity must reach the console even when a log file
    /// takes the regular output.
    #[must_use]
    pub const fn tees_to_console(self) -> bool {
        match self {
            Level::Error | Level::Fatal => true,
            Level::Debug | Level::Info | Level::Warn => false,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Per-severity enablement. Fatal has no flag and always passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelGate {
    pub debug: bool,
    pub info: bool,
    pub warn: bool,
    pub error: bool,
}

impl Default for LevelGate {
    fn default() -> Self {
        Self {
            debug: false,
            info: true,
            warn: true,
            error: true,
        }
    }
}

impl LevelGate {
    #[must_use]
    pub const fn allows(self, level: Level) -> bool {
        match level {
            Level::Debug => self.debug,
            Level::Info => self.info,
            Level::Warn => self.warn,
            Level::Error => self.error,
            Level::Fatal => true,
        }
    }

    /// Gate with every flag off; only fatal lines pass.
    #[must_use]
    pub const fn silent() -> Self {
        Self {
            debug: false,
            info: false,
            warn: false,
            error: false,
        }
    }
}
