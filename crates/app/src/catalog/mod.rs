//! Catalog
//!
//! Game browsing against the RAWG catalog API. Results are never cached: a failed search
//! renders as an empty page with the error, not as stale data.

mod client;
mod errors;
pub mod models;
mod query;

pub use client::{CatalogApi, MockCatalogApi, RawgClient, RawgConfig};
pub use errors::CatalogError;
pub use models::{Game, GameFilters, SearchResult, Tag};
pub use query::CatalogQuery;

/// What a catalog page shows: the results, or nothing and the error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogView {
    /// Results to display. Empty after a failure.
    pub result: SearchResult,

    /// Error message, when the search failed.
    pub error: Option<String>,
}

impl CatalogView {
    /// Build the view for a search outcome.
    pub fn from_result(result: Result<SearchResult, CatalogError>) -> Self {
        match result {
            Ok(result) => Self {
                result,
                error: None,
            },
            Err(err) => Self {
                result: SearchResult::default(),
                error: Some(err.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_search_shows_no_items() {
        let view = CatalogView::from_result(Err(CatalogError::Api {
            status: 500,
            message: "Server error".to_string(),
        }));

        assert!(view.result.items.is_empty());
        assert_eq!(view.result.total_count, 0);
        assert_eq!(
            view.error.as_deref(),
            Some("catalog API error (500): Server error")
        );
    }
}
