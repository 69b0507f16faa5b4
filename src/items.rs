//! Items

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A title in the cart.
///
/// Digital goods are sold one unit per title, so an item is identified by its catalog id
/// alone and carries no quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Catalog id of the game.
    pub id: u64,

    /// Display name.
    pub name: String,

    /// Price at the time the item was added.
    pub price: Decimal,

    /// Cover image URL.
    #[serde(default)]
    pub image: Option<String>,
}

impl CartItem {
    /// Creates a new item without an image.
    pub fn new(id: u64, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            image: None,
        }
    }

    /// Sets the cover image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Returns the price of the item
    pub fn price(&self) -> Decimal {
        self.price
    }
}
