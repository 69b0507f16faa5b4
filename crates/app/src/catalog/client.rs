//! RAWG catalog client.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    catalog::{
        CatalogError,
        models::{Game, GameFilters, GamesPage, SearchResult, Tag, TagsPage},
    },
    http::error_message,
};

/// Game catalog operations.
#[automock]
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Search games, one page at a time.
    async fn search(&self, filters: GameFilters) -> Result<SearchResult, CatalogError>;

    /// Full details of one game.
    async fn game(&self, id: u64) -> Result<Game, CatalogError>;

    /// All genres.
    async fn genres(&self) -> Result<Vec<Tag>, CatalogError>;

    /// All platforms.
    async fn platforms(&self) -> Result<Vec<Tag>, CatalogError>;
}

/// Configuration for the RAWG client.
#[derive(Debug, Clone)]
pub struct RawgConfig {
    /// API root, e.g. `https://api.rawg.io/api`.
    pub base_url: String,

    /// API key. Requests fail with [`CatalogError::MissingApiKey`] when unset.
    pub api_key: Option<String>,
}

/// HTTP client for the RAWG catalog API.
#[derive(Debug, Clone)]
pub struct RawgClient {
    config: RawgConfig,
    http: Client,
}

impl RawgClient {
    /// Create a client sharing the given HTTP client.
    pub fn new(config: RawgConfig, http: Client) -> Self {
        Self { config, http }
    }

    fn api_key(&self) -> Result<&str, CatalogError> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(CatalogError::MissingApiKey)
    }

    pub(crate) fn request(&self, path: &str) -> Result<RequestBuilder, CatalogError> {
        let key = self.api_key()?;
        let url = format!("{}/{path}", self.config.base_url.trim_end_matches('/'));

        Ok(self.http.get(url).query(&[("key", key)]))
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, CatalogError> {
        let response = request.send().await?;

        debug!(url = %redacted(&response), status = %response.status(), "catalog response");

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = error_message(response, "catalog request failed").await;

            return Err(CatalogError::Api { status, message });
        }

        Ok(response.json().await?)
    }
}

/// The response URL without its query string, which carries the API key.
fn redacted(response: &Response) -> String {
    let url = response.url();

    format!("{}{}", url.origin().ascii_serialization(), url.path())
}

#[async_trait]
impl CatalogApi for RawgClient {
    async fn search(&self, filters: GameFilters) -> Result<SearchResult, CatalogError> {
        let request = self.request("games")?.query(&filters.query_pairs());
        let page: GamesPage = self.fetch(request).await?;

        Ok(page.into())
    }

    async fn game(&self, id: u64) -> Result<Game, CatalogError> {
        let request = self.request(&format!("games/{id}"))?;

        self.fetch(request).await
    }

    async fn genres(&self) -> Result<Vec<Tag>, CatalogError> {
        let page: TagsPage = self.fetch(self.request("genres")?).await?;

        Ok(page.results)
    }

    async fn platforms(&self) -> Result<Vec<Tag>, CatalogError> {
        let page: TagsPage = self.fetch(self.request("platforms")?).await?;

        Ok(page.results)
    }
}
