//! Core library for the `ocm-load` CLI.
//!
//! The crate drives HTTP load tests against the OCM cloud-management API and
//! reports through a leveled run logger. The logger writes informational
//! lines to a log file when one is configured and tees failures to both the
//! console and the file, so problems stay visible while the run proceeds.
//! The `ocm-load` binary is the primary interface; library APIs may evolve
//! with it.
pub mod args;
pub mod cases;
pub mod config;
pub mod context;
pub mod entry;
pub mod error;
pub mod http;
pub mod logging;
pub mod shutdown;
pub mod shutdown_handlers;

mod system;
