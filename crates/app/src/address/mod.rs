//! Address lookup
//!
//! Postal-code (CEP) lookup against ViaCEP, used to fill in the registration address.

use async_trait::async_trait;
use iara::{
    address::{AddressFields, InvalidPostalCode, PostalCode},
    validation::RegistrationForm,
};
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::http::{error_message, is_retryable};

/// Errors raised by address lookups.
#[derive(Debug, Error)]
pub enum AddressError {
    /// The postal code does not have 8 digits. No request was made.
    #[error(transparent)]
    InvalidPostalCode(#[from] InvalidPostalCode),

    /// The postal code does not exist.
    #[error("postal code {0} not found")]
    NotFound(PostalCode),

    /// The request could not be completed.
    #[error("address lookup failed")]
    Network {
        /// Whether retrying may succeed, e.g. after a timeout.
        retryable: bool,

        /// Transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-2xx status.
    #[error("address lookup error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,

        /// Error description.
        message: String,
    },

    /// The response body was not the expected JSON.
    #[error("unexpected address lookup response")]
    Decode(#[source] reqwest::Error),
}

impl From<reqwest::Error> for AddressError {
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

/// A resolved postal code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// The postal code looked up.
    pub postal_code: PostalCode,

    /// Fields to fill in.
    pub fields: AddressFields,
}

/// Postal-code lookup.
#[automock]
#[async_trait]
pub trait AddressLookup: Send + Sync {
    /// Resolve a postal code. Formatting characters are ignored.
    async fn lookup(&self, postal_code: &str) -> Result<Address, AddressError>;
}

/// Look up the form's postal code and fill in street, neighborhood, city and state.
///
/// On failure the form is left as it was, so unfilled fields still fail validation.
///
/// # Errors
///
/// Returns the lookup error, e.g. [`AddressError::NotFound`] for `00000-000`.
pub async fn autofill(
    lookup: &dyn AddressLookup,
    form: &mut RegistrationForm,
) -> Result<Address, AddressError> {
    let address = lookup.lookup(&form.cep).await?;

    form.autofill(&address.fields);

    Ok(address)
}

/// HTTP client for ViaCEP.
#[derive(Debug, Clone)]
pub struct ViaCepClient {
    base_url: String,
    http: Client,
}

impl ViaCepClient {
    /// Create a client for the service rooted at `base_url`, e.g. `https://viacep.com.br/ws`.
    pub fn new(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }

    pub(crate) fn url(&self, postal_code: &PostalCode) -> String {
        format!(
            "{}/{}/json/",
            self.base_url.trim_end_matches('/'),
            postal_code.digits()
        )
    }
}

#[async_trait]
impl AddressLookup for ViaCepClient {
    async fn lookup(&self, postal_code: &str) -> Result<Address, AddressError> {
        let postal_code = PostalCode::parse(postal_code)?;
        let url = self.url(&postal_code);

        debug!(%url, "looking up postal code");

        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = error_message(response, "address lookup failed").await;

            return Err(AddressError::Api { status, message });
        }

        let body: ViaCepResponse = response.json().await?;

        body.into_address(postal_code)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorFlag {
    Bool(bool),
    Text(String),
}

impl ErrorFlag {
    fn is_set(&self) -> bool {
        match self {
            Self::Bool(flag) => *flag,
            Self::Text(text) => text.eq_ignore_ascii_case("true"),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ViaCepResponse {
    #[serde(default)]
    logradouro: String,

    #[serde(default)]
    complemento: String,

    #[serde(default)]
    bairro: String,

    #[serde(default)]
    localidade: String,

    #[serde(default)]
    uf: String,

    #[serde(default)]
    erro: Option<ErrorFlag>,
}

impl ViaCepResponse {
    pub(crate) fn into_address(self, postal_code: PostalCode) -> Result<Address, AddressError> {
        if self.erro.as_ref().is_some_and(ErrorFlag::is_set) {
            return Err(AddressError::NotFound(postal_code));
        }

        Ok(Address {
            postal_code,
            fields: AddressFields {
                street: self.logradouro,
                complement: self.complemento,
                neighborhood: self.bairro,
                city: self.localidade,
                state: self.uf,
            },
        })
    }
}
