//! View projection for the catalog.
//!
//! The projector is a pure function of catalog state: it turns products into
//! display cards (formatted price, star glyphs, action affordances) without
//! knowing how those cards end up on screen. `render` contains the plain-text
//! binding used by the terminal editor.

pub mod model;
pub mod projector;
pub mod render;

pub use model::{Action, CatalogView, ProductCard, Star};
pub use projector::{ViewProjector, stars_for};
pub use render::{render_json, render_text};
