//! Plain-text card labels for list summaries.
//!
//! # Responsibility
//! - Reduce markdown card text to a single short line.
//!
//! # Invariants
//! - Output never contains newlines.
//! - Output is at most `CARD_PREVIEW_MAX_CHARS` chars.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum preview length in chars, ellipsis included.
pub const CARD_PREVIEW_MAX_CHARS: usize = 80;

const ELLIPSIS: &str = "...";

static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*]\([^)]+\)").expect("valid image regex"));
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("valid link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\*_`#>~]+").expect("valid markdown symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Derives a one-line label from markdown card text.
///
/// Rules:
/// - images are dropped, links keep their label;
/// - emphasis/heading/code symbols are removed;
/// - whitespace collapses to single spaces;
/// - longer results are cut so that text plus the `...` suffix fits in
///   `CARD_PREVIEW_MAX_CHARS`.
pub fn derive_card_preview(text: &str) -> String {
    let without_images = MARKDOWN_IMAGE_RE.replace_all(text, " ");
    let without_links = MARKDOWN_LINK_RE.replace_all(&without_images, "$1");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_links, " ");
    let normalized = WHITESPACE_RE.replace_all(&without_symbols, " ");
    let trimmed = normalized.trim();

    if trimmed.chars().count() <= CARD_PREVIEW_MAX_CHARS {
        return trimmed.to_string();
    }
    let mut preview = trimmed
        .chars()
        .take(CARD_PREVIEW_MAX_CHARS - ELLIPSIS.len())
        .collect::<String>();
    preview.push_str(ELLIPSIS);
    preview
}
