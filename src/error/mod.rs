mod app;
mod config;
mod http;
mod logging;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use http::HttpError;
pub use logging::LoggingError;
pub use validation::ValidationError;
