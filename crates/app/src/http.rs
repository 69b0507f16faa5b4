//! HTTP
//!
//! One shared client for every external API, with a bounded request timeout.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::Deserialize;

/// Build the shared HTTP client.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialised.
pub fn client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("iara/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Whether a transport failure is worth retrying.
pub fn is_retryable(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect()
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(alias = "detail")]
    error: String,
}

/// Message for a non-2xx response: the API's `error`/`detail` field when present.
pub async fn error_message(response: Response, fallback: &str) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    message_from_body(&text).unwrap_or_else(|| format!("{fallback} (status {status})"))
}

pub(crate) fn message_from_body(text: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(text)
        .ok()
        .map(|body| body.error)
        .filter(|message| !message.trim().is_empty())
}
