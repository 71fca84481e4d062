//! `storefront-core` — catalog foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no rendering, no IO).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult, ImageRejection};
pub use id::ProductId;
pub use value_object::ValueObject;
