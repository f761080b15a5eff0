//! Shared HTTP helpers for providers

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tonebridge::DomainError;

const USER_AGENT: &str = concat!("tonebridge/", env!("CARGO_PKG_VERSION"));

/// Build a client, optionally bounded by a per-request timeout
pub(crate) fn build_client(timeout: Option<Duration>) -> Result<Client, DomainError> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| DomainError::Configuration(format!("Failed to build HTTP client: {}", e)))
}

/// The URL is stripped from the error text so credentials never reach logs
pub(crate) fn request_failed(provider: &str, err: reqwest::Error) -> DomainError {
    let err = err.without_url();
    if err.is_timeout() {
        DomainError::ExternalService(format!("{} request timed out: {}", provider, err))
    } else {
        DomainError::ExternalService(format!("{} request failed: {}", provider, err))
    }
}

/// Map a non-success response to a transport error
///
/// Both OpenAI and Gemini report failures as `{"error": {"message": ...}}`;
/// the raw body is used when it has another shape.
pub(crate) fn map_http_error(provider: &str, status: StatusCode, body: String) -> DomainError {
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|err| err.get("message"))
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        })
        .unwrap_or(body);

    if status == StatusCode::TOO_MANY_REQUESTS {
        return DomainError::ExternalService(format!(
            "{} rate limited ({}): {}",
            provider,
            status.as_u16(),
            message
        ));
    }

    DomainError::ExternalService(format!(
        "{} API error ({}): {}",
        provider,
        status.as_u16(),
        message
    ))
}
