//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use cli::{Command, LoadArgs};
pub use types::{HttpMethod, PositiveU64};

pub(crate) use defaults::{DEFAULT_CONFIG_FILES, DEFAULT_USER_AGENT};
pub(crate) use parsers::parse_header;
