use super::{ConfigError, LoggingError, ValidationError};

impl From<&'static str> for ValidationError {
    fn from(message: &'static str) -> Self {
        ValidationError::TestExpectation { message }
    }
}

impl From<String> for ValidationError {
    fn from(value: String) -> Self {
        ValidationError::TestExpectationValue {
            message: "Test expectation failed",
            value,
        }
    }
}

impl From<&'static str> for ConfigError {
    fn from(message: &'static str) -> Self {
        ConfigError::TestExpectation { message }
    }
}

impl From<String> for ConfigError {
    fn from(value: String) -> Self {
        ConfigError::TestExpectationValue {
            message: "Test expectation failed",
            value,
        }
    }
}

impl From<&'static str> for LoggingError {
    fn from(message: &'static str) -> Self {
        LoggingError::TestExpectation { message }
    }
}

impl From<String> for LoggingError {
    fn from(value: String) -> Self {
        LoggingError::TestExpectationValue {
            message: "Test expectation failed",
            value,
        }
    }
}
