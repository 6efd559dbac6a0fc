//! Leveled run logger.
//!
//! A [`Logger`] is built once from a [`LoggerConfig`] (or through
//! [`LoggerBuilder`]) and then shared by the test handlers. Each severity has
//! its own gate; fatal has none. Output goes to the console, to an
//! append-mode log file, or to both, depending on severity and on whether a
//! file was configured. Routing is per logger; nothing here touches
//! process-wide output state.
mod builder;
mod fatal;
mod format;
mod level;
mod logger;
mod macros;
mod router;
pub mod sink;

#[cfg(test)]
mod tests;

pub use builder::{LoggerBuilder, LoggerConfig};
pub use fatal::{FATAL_EXIT_CODE, FatalSignal};
pub use level::{Level, LevelGate};
pub use logger::Logger;
pub use sink::{ConsoleSink, FileSink, MemorySink, Sink, TeeSink};
