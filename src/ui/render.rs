//! Presentation of ranked hits as text cards or JSON.
//!
//! Everything shown comes from the hit's own item; nothing is looked up in
//! the index again.

use crate::core::error::Result;
use crate::search::hit::{HitItem, MatchHit};

pub const NO_HITS: &str = "Ingen treff ennå.";

/// One-line label for a hit
pub fn headline(hit: &MatchHit) -> String {
    match hit.item {
        HitItem::Pattern(p) => format!("Mønster: {}", p.id),
        HitItem::Component(c) => format!("Komponent: {}", c.name),
        HitItem::Doc(d) => d.title.clone(),
    }
}

/// Card body below the headline
pub fn detail_lines(hit: &MatchHit) -> Vec<String> {
    let mut lines = Vec::new();
    match hit.item {
        HitItem::Pattern(p) => {
            if let Some(summary) = p.summary.as_deref().filter(|s| !s.is_empty()) {
                lines.push(summary.to_string());
            }
            lines.push("Anbefalte komponenter".to_string());
            lines.extend(p.components.iter().map(|c| format!("  - {}", c)));
            if !p.uu_check.is_empty() {
                lines.push("UU-sjekk".to_string());
                lines.extend(p.uu_check.iter().map(|c| format!("  - {}", c)));
            }
        }
        HitItem::Component(c) => {
            lines.push(format!("Alias: {}", c.aliases.join(", ")));
            let mut links = Vec::new();
            if let Some(storybook) = c.links.storybook.as_deref() {
                links.push(format!("Storybook: {}", storybook));
            }
            if let Some(docs) = c.docs_url() {
                links.push(format!("Dok: {}", docs));
            }
            if !links.is_empty() {
                lines.push(links.join(" • "));
            }
            if let Some(image) = c.image.as_deref() {
                lines.push(format!("Bilde: {}", image));
            }
            lines.extend(c.tips.iter().map(|t| format!("  - {}", t)));
        }
        HitItem::Doc(d) => lines.push(d.url.clone()),
    }
    lines
}

/// Render one hit as a text card. Documents are a single "title — url" line
pub fn render_hit(hit: &MatchHit) -> String {
    if let HitItem::Doc(d) = hit.item {
        return format!("{} — {}", d.title, d.url);
    }
    let mut card = headline(hit);
    for line in detail_lines(hit) {
        card.push('\n');
        card.push_str(&line);
    }
    card
}

/// Render at most `limit` hits as text cards separated by blank lines
pub fn render_text(hits: &[MatchHit], limit: usize) -> String {
    if hits.is_empty() {
        return NO_HITS.to_string();
    }
    hits.iter()
        .take(limit)
        .map(render_hit)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render at most `limit` hits as a JSON array
pub fn render_json(hits: &[MatchHit], limit: usize) -> Result<String> {
    let shown = &hits[..hits.len().min(limit)];
    Ok(serde_json::to_string_pretty(shown)?)
}
