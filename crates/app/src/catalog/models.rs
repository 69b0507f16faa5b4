//! Catalog models.

use iara::{items::CartItem, pricing::round_to_cents};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default number of games per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// A genre or platform reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Catalog id.
    pub id: u64,

    /// Display name.
    pub name: String,

    /// URL slug, used as a filter value.
    #[serde(default)]
    pub slug: String,
}

/// Platform entry as nested by the catalog API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformEntry {
    /// The platform.
    pub platform: Tag,
}

/// Screenshot thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screenshot {
    /// Screenshot id.
    pub id: i64,

    /// Image URL.
    pub image: String,
}

/// Age rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EsrbRating {
    /// Rating name, e.g. `Mature`.
    pub name: String,
}

/// A catalog game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Catalog id.
    pub id: u64,

    /// Title.
    pub name: String,

    /// URL slug.
    #[serde(default)]
    pub slug: String,

    /// Cover image URL.
    #[serde(default)]
    pub background_image: Option<String>,

    /// Average rating, 0 to 5.
    #[serde(default)]
    pub rating: f64,

    /// Best possible rating.
    #[serde(default)]
    pub rating_top: u32,

    /// Number of ratings.
    #[serde(default)]
    pub ratings_count: u64,

    /// Release date, `YYYY-MM-DD`.
    #[serde(default)]
    pub released: Option<String>,

    /// Genres.
    #[serde(default)]
    pub genres: Vec<Tag>,

    /// Platforms.
    #[serde(default)]
    pub platforms: Vec<PlatformEntry>,

    /// Screenshot thumbnails. Only present in search results.
    #[serde(default)]
    pub short_screenshots: Vec<Screenshot>,

    /// Plain-text description. Only present in game details.
    #[serde(default)]
    pub description_raw: Option<String>,

    /// Metacritic score.
    #[serde(default)]
    pub metacritic: Option<u32>,

    /// Average hours played.
    #[serde(default)]
    pub playtime: Option<u32>,

    /// Age rating.
    #[serde(default)]
    pub esrb_rating: Option<EsrbRating>,
}

impl Game {
    /// Storefront price: `rating * 10 + 20`, rounded to cents.
    pub fn price(&self) -> Decimal {
        let rating = Decimal::try_from(self.rating).unwrap_or_default();

        round_to_cents(rating * Decimal::TEN + Decimal::from(20))
    }

    /// Snapshot the game as a cart item at the current price.
    pub fn to_cart_item(&self) -> CartItem {
        let item = CartItem::new(self.id, self.name.clone(), self.price());

        match &self.background_image {
            Some(image) => item.with_image(image.clone()),
            None => item,
        }
    }

    /// Platform names, in catalog order.
    pub fn platform_names(&self) -> Vec<&str> {
        self.platforms
            .iter()
            .map(|entry| entry.platform.name.as_str())
            .collect()
    }
}

/// Search filters. Empty strings are treated as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameFilters {
    /// Free-text search.
    pub search: Option<String>,

    /// 1-indexed page.
    pub page: u32,

    /// Games per page.
    pub page_size: u32,

    /// Sort order, e.g. `-rating`.
    pub ordering: Option<String>,

    /// Comma-separated genre ids or slugs.
    pub genres: Option<String>,

    /// Comma-separated platform ids.
    pub platforms: Option<String>,
}

impl GameFilters {
    /// Query-string pairs, with defaults applied and unset filters omitted.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.max(1).to_string()),
            (
                "page_size",
                if self.page_size == 0 {
                    DEFAULT_PAGE_SIZE
                } else {
                    self.page_size
                }
                .to_string(),
            ),
        ];

        let optional = [
            ("search", &self.search),
            ("ordering", &self.ordering),
            ("genres", &self.genres),
            ("platforms", &self.platforms),
        ];

        for (name, value) in optional {
            if let Some(value) = value.as_deref().filter(|value| !value.trim().is_empty()) {
                pairs.push((name, value.to_string()));
            }
        }

        pairs
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    /// Games on this page.
    pub items: Vec<Game>,

    /// Games matching the filters across all pages.
    pub total_count: u64,

    /// Whether another page follows.
    pub has_next_page: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GamesPage {
    #[serde(default)]
    pub(crate) count: u64,

    #[serde(default)]
    pub(crate) next: Option<String>,

    #[serde(default)]
    pub(crate) results: Vec<Game>,
}

impl From<GamesPage> for SearchResult {
    fn from(page: GamesPage) -> Self {
        Self {
            items: page.results,
            total_count: page.count,
            has_next_page: page.next.is_some(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TagsPage {
    #[serde(default)]
    pub(crate) results: Vec<Tag>,
}
