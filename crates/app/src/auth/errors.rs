//! Auth errors.

use iara::{session::SessionError, validation::ValidationErrors};
use thiserror::Error;

use crate::http::is_retryable;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Rejected(String),

    #[error("invalid registration: {0}")]
    Validation(ValidationErrors),

    #[error("auth request failed")]
    Network {
        retryable: bool,

        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected auth response")]
    Decode(#[source] reqwest::Error),

    #[error("failed to update session")]
    Session(#[from] SessionError),
}

impl From<reqwest::Error> for AuthError {
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
