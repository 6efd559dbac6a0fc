use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Invalid gateway URL '{url}': {source}")]
    InvalidGatewayUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Failed to join path '{path}' onto the gateway URL: {source}")]
    JoinPathFailed {
        path: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Invalid header '{name}'.")]
    InvalidHeaderName { name: String },
    #[error("Invalid value for header '{name}'.")]
    InvalidHeaderValue { name: String },
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Gateway preflight request failed: {source}")]
    PreflightFailed {
        #[source]
        source: reqwest::Error,
    },
}
