use std::time::Duration;

use serde::Deserialize;

use crate::args::parsers::parse_duration;
use crate::error::ValidationError;
use crate::logging::LoggerConfig;

/// On-disk configuration. Every field is optional; CLI values given
/// explicitly take precedence.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub gateway_url: Option<String>,
    pub duration: Option<DurationValue>,
    pub rate: Option<u64>,
    #[serde(alias = "tests")]
    pub test_names: Option<Vec<String>>,
    pub headers: Option<Vec<String>>,
    pub insecure: Option<bool>,
    pub timeout: Option<DurationValue>,
    pub cooldown: Option<DurationValue>,
    pub account_username: Option<String>,
    pub logging: Option<LoggerConfig>,
}

/// Either whole seconds or a suffixed string such as `"250ms"` or `"2m"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(0) => Err(ValidationError::DurationZero),
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration(text),
        }
    }
}
