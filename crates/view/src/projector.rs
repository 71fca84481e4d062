use storefront_catalog::{CatalogStore, Product, Rating};

use crate::model::{Action, CatalogView, ProductCard, Star};

/// Builds [`CatalogView`]s from products.
///
/// Projection is pure and deterministic: the same products always give an
/// equal view, so re-rendering unchanged state is a no-op for the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewProjector {
    currency: String,
}

impl Default for ViewProjector {
    fn default() -> Self {
        Self::new("$")
    }
}

impl ViewProjector {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Project an ordered sequence of products (full catalog or a subset).
    pub fn project<'a, I>(&self, products: I) -> CatalogView
    where
        I: IntoIterator<Item = &'a Product>,
    {
        CatalogView {
            cards: products.into_iter().map(|p| self.card(p)).collect(),
        }
    }

    /// Project the whole store, or only the products matching `query` when it
    /// is non-empty.
    pub fn project_store(&self, store: &CatalogStore, query: Option<&str>) -> CatalogView {
        match query {
            Some(q) if !q.is_empty() => self.project(store.filter(q)),
            _ => self.project(store.products()),
        }
    }

    fn card(&self, product: &Product) -> ProductCard {
        ProductCard {
            id: product.id_typed().to_string(),
            image: product.image().map(|i| i.as_str().to_string()),
            name: product.name().to_string(),
            description: product.description().to_string(),
            price: format!("{}{}", self.currency, product.price()),
            stars: stars_for(product.rating()),
            actions: vec![
                Action::Edit,
                Action::Delete,
                Action::Rate {
                    min: Rating::MIN,
                    max: Rating::MAX,
                },
            ],
        }
    }
}

/// Five stars, the first `rating` filled (none when unrated).
pub fn stars_for(rating: Option<Rating>) -> [Star; 5] {
    let filled = rating.map(|r| usize::from(r.value())).unwrap_or(0);
    core::array::from_fn(|i| if i < filled { Star::Filled } else { Star::Empty })
}
