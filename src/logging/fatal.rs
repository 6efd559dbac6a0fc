use thiserror::Error;

/// Exit status used when a run ends through the fatal path.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Proof that a fatal line was logged and the log file released.
///
/// Holding one means the run cannot continue; the owner either calls
/// [`FatalSignal::exit`] or propagates it as an error.
#[derive(Debug, Error)]
#[error("{message}")]
#[must_use = "a fatal signal ends the run; call `exit` or propagate it"]
pub struct FatalSignal {
    message: String,
}

impl FatalSignal {
    pub(crate) const fn new(message: String) -> Self {
        Self { message }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        FATAL_EXIT_CODE
    }

    pub fn exit(self) -> ! {
        std::process::exit(self.exit_code())
    }
}
