//! In-memory catalog store.
//!
//! The store owns the ordered product list. Every operation runs to
//! completion synchronously, so there is no locking: callers hold the store by
//! `&mut` for mutations and by `&` for reads.

use chrono::Utc;

use storefront_core::{DomainError, DomainResult, Entity, ProductId};

use crate::product::{Product, ProductFields, Rating};

/// Ordered, mutable collection of products.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    products: Vec<Product>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products in stored order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Validate form input and append a new product with a fresh id.
    ///
    /// On validation failure nothing is mutated.
    pub fn create(&mut self, fields: ProductFields) -> DomainResult<ProductId> {
        let valid = match fields.validate() {
            Ok(valid) => valid,
            Err(err) => {
                tracing::warn!(error = %err, "product rejected");
                return Err(err);
            }
        };

        let mut id = ProductId::new();
        while self.find_by_id(id).is_some() {
            id = ProductId::new();
        }

        let product = Product::new(id, valid, Utc::now());
        tracing::info!(product_id = %id, name = %product.name(), "product created");
        self.products.push(product);
        Ok(id)
    }

    /// Remove the product with `id`. An unknown id is a no-op.
    pub fn remove(&mut self, id: ProductId) -> Option<Product> {
        let index = self.position(id)?;
        let removed = self.products.remove(index);
        tracing::info!(product_id = %id, "product removed");
        Some(removed)
    }

    pub fn find_by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.has_id(&id))
    }

    /// Set the rating of an existing product.
    ///
    /// Out-of-range values and unknown ids leave the store untouched.
    pub fn set_rating(&mut self, id: ProductId, value: i64) -> DomainResult<Rating> {
        let rating = Rating::new(value).inspect_err(|err| {
            tracing::warn!(product_id = %id, error = %err, "rating rejected");
        })?;
        self.apply_rating(id, rating)
    }

    /// Same as [`CatalogStore::set_rating`], from the text of a rating input.
    pub fn rate_from_input(&mut self, id: ProductId, raw: &str) -> DomainResult<Rating> {
        let rating = Rating::parse(raw).inspect_err(|err| {
            tracing::warn!(product_id = %id, error = %err, "rating rejected");
        })?;
        self.apply_rating(id, rating)
    }

    fn apply_rating(&mut self, id: ProductId, rating: Rating) -> DomainResult<Rating> {
        let index = self.position(id).ok_or_else(DomainError::not_found)?;
        self.products[index].set_rating(rating);
        tracing::info!(product_id = %id, rating = rating.value(), "product rated");
        Ok(rating)
    }

    /// Stable sort by case-insensitive name.
    pub fn sort_by_name(&mut self) {
        self.products.sort_by_cached_key(|p| p.name().to_lowercase());
        tracing::debug!(count = self.products.len(), "sorted by name");
    }

    /// Stable sort by ascending price.
    pub fn sort_by_price(&mut self) {
        self.products
            .sort_by(|a, b| a.price().value().total_cmp(&b.price().value()));
        tracing::debug!(count = self.products.len(), "sorted by price");
    }

    /// Products whose name or description contains `text`, ignoring case, in
    /// stored order. An empty `text` matches everything.
    pub fn filter(&self, text: &str) -> Vec<&Product> {
        let needle = text.to_lowercase();
        let matched: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| p.matches_lowercase(&needle))
            .collect();
        tracing::debug!(query = %text, matched = matched.len(), "filtered catalog");
        matched
    }

    /// Remove a product and hand back its fields for re-editing.
    ///
    /// The product leaves the catalog immediately; resubmitting the fields
    /// creates a new product under a new id.
    pub fn take_for_edit(&mut self, id: ProductId) -> Option<ProductFields> {
        let removed = self.remove(id)?;
        tracing::info!(product_id = %id, "product taken for edit");
        Some(removed.to_fields())
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.products.iter().position(|p| p.has_id(&id))
    }
}
