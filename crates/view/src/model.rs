//! View-model types produced by the projector.

use serde::Serialize;

/// Fully rendered catalog list. Each render replaces the previous one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogView {
    pub cards: Vec<ProductCard>,
}

impl CatalogView {
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.cards.iter().map(|c| c.name.as_str()).collect()
    }
}

/// One product as displayed in the list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub id: String,
    pub image: Option<String>,
    pub name: String,
    pub description: String,
    /// Currency symbol followed by the stored price.
    pub price: String,
    pub stars: [Star; 5],
    pub actions: Vec<Action>,
}

impl ProductCard {
    pub fn filled_stars(&self) -> usize {
        self.stars.iter().filter(|s| **s == Star::Filled).count()
    }

    /// The five glyphs as a single string, e.g. `★★★★☆`.
    pub fn star_glyphs(&self) -> String {
        self.stars.iter().map(|s| s.glyph()).collect()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Star {
    Filled,
    Empty,
}

impl Star {
    pub fn glyph(self) -> char {
        match self {
            Star::Filled => '★',
            Star::Empty => '☆',
        }
    }
}

/// Interaction a card offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Action {
    Edit,
    Delete,
    /// Rating submission accepting an integer in `min..=max`.
    Rate { min: u8, max: u8 },
}
