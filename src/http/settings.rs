use std::time::Duration;

use url::Url;

use crate::args::{LoadArgs, PositiveU64};
use crate::error::{AppError, AppResult, HttpError, ValidationError};

/// Resolved parameters shared by every test in a run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub gateway_url: Url,
    pub duration: Duration,
    pub rate: PositiveU64,
    pub headers: Vec<(String, String)>,
    pub insecure: bool,
    pub request_timeout: Duration,
    pub cooldown: Option<Duration>,
    pub account_username: String,
}

impl RunSettings {
    /// # Errors
    ///
    /// Returns an error when the gateway URL is missing or cannot be parsed.
    pub fn from_args(args: &LoadArgs) -> AppResult<Self> {
        let raw = args
            .gateway_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| AppError::validation(ValidationError::MissingGatewayUrl))?;
        let gateway_url = Url::parse(raw).map_err(|source| {
            AppError::http(HttpError::InvalidGatewayUrl {
                url: raw.to_owned(),
                source,
            })
        })?;
        Ok(Self {
            gateway_url,
            duration: args.duration,
            rate: args.rate,
            headers: args.headers.clone(),
            insecure: args.insecure,
            request_timeout: args.request_timeout,
            cooldown: args.cooldown,
            account_username: args.account_username.clone(),
        })
    }

    /// Absolute URL for a test case path.
    ///
    /// # Errors
    ///
    /// Returns an error when the path cannot be joined onto the gateway URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, HttpError> {
        self.gateway_url
            .join(path)
            .map_err(|source| HttpError::JoinPathFailed {
                path: path.to_owned(),
                source,
            })
    }

    /// Spacing between request starts for the configured rate.
    #[must_use]
    pub fn request_interval(&self) -> Duration {
        const NANOS_PER_SEC: u64 = 1_000_000_000;
        let nanos = NANOS_PER_SEC
            .checked_div(self.rate.get())
            .unwrap_or(1)
            .max(1);
        Duration::from_nanos(nanos)
    }
}
