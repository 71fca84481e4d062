//! Value object trait: equality by value, not identity.
//!
//! Prices and ratings are value objects: two prices holding the same number
//! are the same price. Products, on the other hand, are entities.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// construct a new value (which re-runs its validation).
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// struct Price(f64);
///
/// impl ValueObject for Price {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
