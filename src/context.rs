//! Per-call context handed to every logger emission and test handler.
//!
//! The run logger carries a [`Context`] through each call without looking
//! inside it. Handlers use it to learn which test they belong to and whether
//! a shutdown was requested.

use std::sync::Arc;

use crate::shutdown::ShutdownSender;

#[derive(Debug, Clone, Default)]
pub struct Context {
    test_name: Option<Arc<str>>,
    shutdown: Option<ShutdownSender>,
}

impl Context {
    /// Empty context with no test and no shutdown wiring.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_shutdown(mut self, shutdown: &ShutdownSender) -> Self {
        self.shutdown = Some(shutdown.clone());
        self
    }

    /// Derive a context scoped to a single test case.
    #[must_use]
    pub fn for_test(&self, name: &str) -> Self {
        Self {
            test_name: Some(Arc::from(name)),
            shutdown: self.shutdown.clone(),
        }
    }

    #[must_use]
    pub fn test_name(&self) -> Option<&str> {
        self.test_name.as_deref()
    }

    #[must_use]
    pub const fn shutdown(&self) -> Option<&ShutdownSender> {
        self.shutdown.as_ref()
    }
}
