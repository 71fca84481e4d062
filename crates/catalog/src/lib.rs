//! Catalog domain module.
//!
//! This crate contains the product catalog: field validation, image intake and
//! the in-memory store, implemented purely as deterministic domain logic (no
//! rendering, no IO).

pub mod image;
pub mod product;
pub mod store;

pub use image::{AcceptedImage, ImageCandidate, ImageIntake, DEFAULT_MAX_IMAGE_BYTES};
pub use product::{ImageRef, Price, Product, ProductFields, Rating, ValidFields};
pub use store::CatalogStore;
