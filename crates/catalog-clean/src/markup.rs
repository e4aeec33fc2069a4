//! Markup-to-text extraction.

use scraper::Html;

/// Extracts the visible text of an HTML fragment.
///
/// Text nodes are trimmed, empty ones dropped, and the rest joined with a
/// single space. Malformed or partial markup is parsed best-effort; plain
/// text passes through unchanged apart from trimming.
pub fn strip_markup_text(raw: &str) -> String {
    let fragment = Html::parse_fragment(raw);
    fragment
        .root_element()
        .text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
