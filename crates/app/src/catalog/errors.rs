//! Catalog errors.

use thiserror::Error;

use crate::http::is_retryable;

/// Errors raised by the catalog client.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No API key is configured. Never retried.
    #[error("catalog API key is not configured; set RAWG_API_KEY")]
    MissingApiKey,

    /// The request could not be completed.
    #[error("catalog request failed")]
    Network {
        /// Whether retrying may succeed, e.g. after a timeout.
        retryable: bool,

        /// Transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-2xx status.
    #[error("catalog API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,

        /// API error message, or a generic description.
        message: String,
    },

    /// The response body was not the expected JSON.
    #[error("unexpected catalog response")]
    Decode(#[source] reqwest::Error),
}

impl CatalogError {
    /// Whether retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { retryable: true, .. })
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(source: reqwest::Error) -> Self {
        // Request URLs can carry API keys.
        let source = source.without_url();

        if source.is_decode() {
            return Self::Decode(source);
        }

        Self::Network {
            retryable: is_retryable(&source),
            source,
        }
    }
}
