//! Bindings from [`CatalogView`] to concrete output.

use core::fmt::Write as _;

use crate::model::{Action, CatalogView};

/// Plain-text list, one block per card.
pub fn render_text(view: &CatalogView) -> String {
    if view.is_empty() {
        return "(no products)\n".to_string();
    }

    let mut out = String::new();
    for card in &view.cards {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "[{}] {}  {}", card.id, card.name, card.price);
        let _ = writeln!(out, "    {}", card.description);
        let _ = writeln!(out, "    {}", card.star_glyphs());
        if let Some(image) = &card.image {
            let _ = writeln!(out, "    image: {}", abbreviate(image, 48));
        }
        let actions: Vec<String> = card
            .actions
            .iter()
            .map(|a| match a {
                Action::Edit => "edit".to_string(),
                Action::Delete => "delete".to_string(),
                Action::Rate { min, max } => format!("rate {min}-{max}"),
            })
            .collect();
        let _ = writeln!(out, "    actions: {}", actions.join(" | "));
    }
    out
}

/// JSON document of the view, for renderers living outside this process.
pub fn render_json(view: &CatalogView) -> serde_json::Result<String> {
    serde_json::to_string_pretty(view)
}

fn abbreviate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let head: String = s.chars().take(max_chars).collect();
    format!("{head}...")
}
