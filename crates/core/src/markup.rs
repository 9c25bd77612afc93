//! Flattening of post markup to plain text.

use scraper::{ElementRef, Html, Node};

/// Classes whose elements only hold scaffolding (alt-text helpers, poll
/// widgets) and would otherwise leak into the text.
pub const NOISE_CLASSES: [&str; 4] = [
    "tmblr-alt-text-helper",
    "poll-question",
    "poll-row",
    "poll-see-results",
];

// Raw text inside these never renders.
const INVISIBLE_ELEMENTS: [&str; 3] = ["script", "style", "template"];

/// Flatten a post body to plain text.
///
/// Elements carrying a [`NOISE_CLASSES`] class are dropped with their whole
/// subtree. Every remaining text node is trimmed, empty ones are discarded and
/// the rest are joined with a single space. Malformed markup is parsed on a
/// best-effort basis; the result is empty when nothing readable remains.
pub fn extract_text(body: &str) -> String {
    let fragment = Html::parse_fragment(body);
    let mut parts = Vec::new();
    collect_text(fragment.root_element(), &mut parts);
    parts.join(" ")
}

fn collect_text<'a>(element: ElementRef<'a>, parts: &mut Vec<&'a str>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    parts.push(trimmed);
                }
            }
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    if is_visible(&child) {
                        collect_text(child, parts);
                    }
                }
            }
            _ => {}
        }
    }
}

fn is_visible(element: &ElementRef<'_>) -> bool {
    let value = element.value();
    if INVISIBLE_ELEMENTS.contains(&value.name()) {
        return false;
    }
    !value.classes().any(|class| NOISE_CLASSES.contains(&class))
}
