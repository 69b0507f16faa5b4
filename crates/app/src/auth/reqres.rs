//! ReqRes mock auth client.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::{
    auth::{AuthApi, AuthError, AuthToken, Credentials},
    http::error_message,
};

/// Configuration for connecting to ReqRes.
#[derive(Debug, Clone)]
pub struct ReqresConfig {
    /// API root, e.g. `"https://reqres.in/api"`.
    pub base_url: String,

    /// Value of the `x-api-key` header.
    pub api_key: String,
}

/// HTTP client for the ReqRes login and register endpoints.
#[derive(Debug, Clone)]
pub struct ReqresClient {
    config: ReqresConfig,
    http: Client,
}

impl ReqresClient {
    /// Create a client sharing the given HTTP client.
    pub fn new(config: ReqresConfig, http: Client) -> Self {
        Self { config, http }
    }

    pub(crate) fn request(
        &self,
        endpoint: &str,
        credentials: &Credentials,
    ) -> reqwest::RequestBuilder {
        let url = format!("{}/{endpoint}", self.config.base_url.trim_end_matches('/'));

        self.http
            .post(url)
            .header("x-api-key", &self.config.api_key)
            .json(credentials)
    }

    async fn post(
        &self,
        endpoint: &str,
        credentials: &Credentials,
        fallback: &str,
    ) -> Result<AuthToken, AuthError> {
        debug!(endpoint, email = %credentials.email, "auth request");

        let response = self.request(endpoint, credentials).send().await?;

        if !response.status().is_success() {
            return Err(AuthError::Rejected(error_message(response, fallback).await));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl AuthApi for ReqresClient {
    async fn login(&self, credentials: &Credentials) -> Result<AuthToken, AuthError> {
        self.post("login", credentials, "login failed, check your credentials")
            .await
    }

    async fn register(&self, credentials: &Credentials) -> Result<AuthToken, AuthError> {
        self.post("register", credentials, "registration failed, try again")
            .await
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn request_carries_api_key_and_json_body() -> TestResult {
        let client = ReqresClient::new(
            ReqresConfig {
                base_url: "https://reqres.in/api/".to_string(),
                api_key: "reqres-free-v1".to_string(),
            },
            Client::new(),
        );

        let request = client
            .request("login", &Credentials::new("eve.holt@reqres.in", "cityslicka"))
            .build()?;

        assert_eq!(request.url().as_str(), "https://reqres.in/api/login");
        assert_eq!(
            request.headers().get("x-api-key").map(|value| value.as_bytes()),
            Some(b"reqres-free-v1".as_slice())
        );

        let body = request
            .body()
            .and_then(reqwest::Body::as_bytes)
            .ok_or("missing body")?;
        let body: serde_json::Value = serde_json::from_slice(body)?;

        assert_eq!(body["email"], "eve.holt@reqres.in");
        assert_eq!(body["password"], "cityslicka");

        Ok(())
    }
}
