//! Catalog browsing state.

use crate::catalog::{
    CatalogApi, CatalogError,
    models::{DEFAULT_PAGE_SIZE, GameFilters, SearchResult},
};

/// Filters and page of a browsing session.
///
/// Changing any filter other than the page starts again from page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    filters: GameFilters,
    has_next_page: bool,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            filters: GameFilters {
                page: 1,
                page_size: DEFAULT_PAGE_SIZE,
                ..GameFilters::default()
            },
            has_next_page: false,
        }
    }
}

impl CatalogQuery {
    /// First page, no filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters for the current page.
    pub fn filters(&self) -> &GameFilters {
        &self.filters
    }

    /// Current page, starting at 1.
    pub fn page(&self) -> u32 {
        self.filters.page
    }

    /// Whether the last result reported another page.
    pub fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    /// Set the free-text search.
    pub fn set_search(&mut self, search: Option<String>) {
        self.update(|filters| filters.search = search);
    }

    /// Set the sort order.
    pub fn set_ordering(&mut self, ordering: Option<String>) {
        self.update(|filters| filters.ordering = ordering);
    }

    /// Set the genre filter.
    pub fn set_genres(&mut self, genres: Option<String>) {
        self.update(|filters| filters.genres = genres);
    }

    /// Set the platform filter.
    pub fn set_platforms(&mut self, platforms: Option<String>) {
        self.update(|filters| filters.platforms = platforms);
    }

    /// Set the page size.
    pub fn set_page_size(&mut self, page_size: u32) {
        self.update(|filters| filters.page_size = page_size.max(1));
    }

    /// Jump to a page. Pages below 1 are clamped to 1.
    pub fn go_to_page(&mut self, page: u32) {
        self.filters.page = page.max(1);
    }

    /// Advance one page, only when the last result had a next page.
    pub fn next_page(&mut self) -> bool {
        if !self.has_next_page {
            return false;
        }

        self.filters.page += 1;
        self.has_next_page = false;

        true
    }

    /// Go back one page, never below 1.
    pub fn prev_page(&mut self) -> bool {
        if self.filters.page <= 1 {
            return false;
        }

        self.filters.page -= 1;

        true
    }

    /// Record the outcome of a search for the current filters.
    pub fn record(&mut self, result: &SearchResult) {
        self.has_next_page = result.has_next_page;
    }

    /// Search the current page and record whether another follows.
    ///
    /// # Errors
    ///
    /// Returns the catalog error; the next-page flag is cleared.
    pub async fn fetch(&mut self, catalog: &dyn CatalogApi) -> Result<SearchResult, CatalogError> {
        match catalog.search(self.filters.clone()).await {
            Ok(result) => {
                self.record(&result);
                Ok(result)
            }
            Err(err) => {
                self.has_next_page = false;
                Err(err)
            }
        }
    }

    fn update(&mut self, change: impl FnOnce(&mut GameFilters)) {
        let before = self.filters.clone();

        change(&mut self.filters);

        if self.filters != before {
            self.filters.page = 1;
            self.has_next_page = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::catalog::MockCatalogApi;

    use super::*;

    fn with_next() -> SearchResult {
        SearchResult {
            has_next_page: true,
            ..SearchResult::default()
        }
    }

    #[test]
    fn changing_a_filter_resets_the_page() {
        let mut query = CatalogQuery::new();

        query.record(&with_next());
        query.next_page();
        query.record(&with_next());
        query.next_page();

        assert_eq!(query.page(), 3);

        query.set_search(Some("celeste".to_string()));

        assert_eq!(query.page(), 1);
        assert_eq!(query.filters().search.as_deref(), Some("celeste"));
    }

    #[test]
    fn setting_the_same_filter_keeps_the_page() {
        let mut query = CatalogQuery::new();

        query.set_ordering(Some("-rating".to_string()));
        query.go_to_page(4);
        query.set_ordering(Some("-rating".to_string()));

        assert_eq!(query.page(), 4);
    }

    #[test]
    fn next_page_needs_a_next_page() {
        let mut query = CatalogQuery::new();

        assert!(!query.next_page());
        assert_eq!(query.page(), 1);

        query.record(&with_next());

        assert!(query.next_page());
        assert_eq!(query.page(), 2);
    }

    #[test]
    fn prev_page_stops_at_one() {
        let mut query = CatalogQuery::new();

        assert!(!query.prev_page());

        query.go_to_page(2);

        assert!(query.prev_page());
        assert!(!query.prev_page());
        assert_eq!(query.page(), 1);

        query.go_to_page(0);

        assert_eq!(query.page(), 1);
    }

    #[tokio::test]
    async fn fetch_searches_current_filters() -> TestResult {
        let mut catalog = MockCatalogApi::new();

        catalog
            .expect_search()
            .once()
            .withf(|filters| filters.page == 2 && filters.genres.as_deref() == Some("indie"))
            .return_once(|_| Ok(with_next()));

        catalog.expect_game().never();

        let mut query = CatalogQuery::new();

        query.set_genres(Some("indie".to_string()));
        query.go_to_page(2);

        let result = query.fetch(&catalog).await?;

        assert!(result.has_next_page);
        assert!(query.has_next_page());

        Ok(())
    }

    #[tokio::test]
    async fn failed_fetch_clears_next_page() {
        let mut catalog = MockCatalogApi::new();

        catalog
            .expect_search()
            .once()
            .return_once(|_| Err(CatalogError::MissingApiKey));

        let mut query = CatalogQuery::new();
        query.record(&with_next());

        let result = query.fetch(&catalog).await;

        assert!(result.is_err(), "expected an error, got {result:?}");
        assert!(!query.next_page());
    }
}
