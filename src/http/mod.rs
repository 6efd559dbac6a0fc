//! HTTP dispatch of test cases against the gateway.
mod client;
mod handlers;
mod runner;
mod settings;


pub use client::{build_client, preflight};
pub use handlers::PreparedCase;
pub use runner::{TestOutcome, run_all, run_test};
pub use settings::RunSettings;
