use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::args::DEFAULT_USER_AGENT;
use crate::error::HttpError;

use super::settings::RunSettings;

/// Build the shared client for a run.
///
/// # Errors
///
/// Returns an error when a header is invalid or the client cannot be built.
pub fn build_client(settings: &RunSettings) -> Result<Client, HttpError> {
    let mut headers = HeaderMap::with_capacity(settings.headers.len());
    for (name, value) in &settings.headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_invalid| HttpError::InvalidHeaderName { name: name.clone() })?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|_invalid| HttpError::InvalidHeaderValue { name: name.clone() })?;
        headers.append(header_name, header_value);
    }

    Client::builder()
        .user_agent(DEFAULT_USER_AGENT)
        .default_headers(headers)
        .timeout(settings.request_timeout)
        .danger_accept_invalid_certs(settings.insecure)
        .build()
        .map_err(|source| HttpError::BuildClientFailed { source })
}

/// One GET against the gateway root. Any HTTP response counts as reachable.
///
/// # Errors
///
/// Returns [`HttpError::PreflightFailed`] when no response arrives.
pub async fn preflight(client: &Client, settings: &RunSettings) -> Result<(), HttpError> {
    let response = client
        .get(settings.gateway_url.clone())
        .send()
        .await
        .map_err(|source| HttpError::PreflightFailed { source })?;
    tracing::debug!(
        "Preflight to {} answered {}",
        settings.gateway_url,
        response.status()
    );
    Ok(())
}
