use clap::{Parser, Subcommand};
use std::time::Duration;

use crate::cases::DEFAULT_ACCOUNT_USERNAME;

use super::defaults::{DEFAULT_DURATION, DEFAULT_RATE, DEFAULT_REQUEST_TIMEOUT};
use super::parsers::{parse_duration_arg, parse_header, parse_positive_u64};
use super::types::PositiveU64;

#[derive(Debug, Subcommand, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the registered test cases and exit
    List,
}

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "HTTP load tester for the OCM cloud-management API, with a leveled run log."
)]
pub struct LoadArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Base URL of the gateway under test
    #[arg(long = "gateway-url", short = 'g', env = "OCM_LOAD_GATEWAY_URL")]
    pub gateway_url: Option<String>,

    /// How long each test runs (supports ms/s/m/h)
    #[arg(long, short = 'd', default_value = DEFAULT_DURATION, value_parser = parse_duration_arg)]
    pub duration: Duration,

    /// Requests per second for each test
    #[arg(long, short = 'r', default_value = DEFAULT_RATE, value_parser = parse_positive_u64)]
    pub rate: PositiveU64,

    /// Tests to run, repeatable or comma-separated (default: all)
    #[arg(long = "test-names", short = 't', value_delimiter = ',')]
    pub test_names: Vec<String>,

    /// Extra HTTP headers in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Accept invalid TLS certificates
    #[arg(long)]
    pub insecure: bool,

    /// Per-request timeout (supports ms/s/m/h)
    #[arg(long = "timeout", default_value = DEFAULT_REQUEST_TIMEOUT, value_parser = parse_duration_arg)]
    pub request_timeout: Duration,

    /// Pause between consecutive tests (supports ms/s/m/h)
    #[arg(long, value_parser = parse_duration_arg)]
    pub cooldown: Option<Duration>,

    /// Account username sent in access-review bodies
    #[arg(long = "account-username", default_value = DEFAULT_ACCOUNT_USERNAME)]
    pub account_username: String,

    /// Path to config file (TOML or JSON)
    #[arg(long, short = 'c')]
    pub config: Option<String>,

    /// Append run log lines to this file; errors still reach stderr
    #[arg(long = "log-file", short = 'l', env = "OCM_LOAD_LOG_FILE")]
    pub log_file: Option<String>,

    /// Enable debug lines in the run log
    #[arg(long)]
    pub debug: bool,

    /// Disable info lines in the run log
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Verbose tool diagnostics (separate from the run log)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable colored diagnostics output
    #[arg(long = "no-color")]
    pub no_color: bool,
}
