//! HTML text and anchor extraction
//!
//! Strips markup to text for the relevance rules and collects anchor
//! ids/names for section-tier checks. Script, style and noscript
//! contents are excluded.

use scraper::Html;
use std::collections::HashSet;

/// Extracted page content, normalized for matching.
#[derive(Debug, Clone, Default)]
pub struct PageText {
    /// Whitespace-normalized, lowercased visible text
    pub text: String,

    /// Anchor ids and names present in the markup, as written
    pub anchors: HashSet<String>,
}

impl PageText {
    /// Whether the page text contains the needle, whitespace-normalized
    /// and case-insensitive.
    pub fn contains(&self, needle: &str) -> bool {
        let needle = normalize_ws(needle).to_lowercase();
        !needle.is_empty() && self.text.contains(&needle)
    }

    /// Whether a URL fragment matches an anchor on the page. Matches
    /// exactly, case-insensitively, and with dash/underscore swapped,
    /// since generators disagree on anchor spelling.
    pub fn has_anchor(&self, fragment: &str) -> bool {
        if self.anchors.contains(fragment) {
            return true;
        }
        let lower = fragment.to_lowercase();
        let swapped = fragment.replace('-', "_");
        self.anchors
            .iter()
            .any(|a| a.to_lowercase() == lower || *a == swapped)
    }
}

/// Collapse runs of whitespace to single spaces and trim.
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse an HTML document into matching-ready text plus anchors.
pub fn extract_page(html: &str) -> PageText {
    let document = Html::parse_document(html);
    let mut parts: Vec<&str> = Vec::new();
    let mut anchors = HashSet::new();

    for node in document.tree.nodes() {
        if let Some(element) = node.value().as_element() {
            if let Some(id) = element.attr("id") {
                if !id.is_empty() {
                    anchors.insert(id.to_string());
                }
            }
            if let Some(name) = element.attr("name") {
                if !name.is_empty() {
                    anchors.insert(name.to_string());
                }
            }
        } else if let Some(text) = node.value().as_text() {
            let skipped = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|e| matches!(e.name(), "script" | "style" | "noscript"))
            });
            if !skipped {
                parts.push(text);
            }
        }
    }

    PageText {
        text: normalize_ws(&parts.join(" ")).to_lowercase(),
        anchors,
    }
}
