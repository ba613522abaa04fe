//! Text normalization shared by every extraction stage.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HORIZONTAL_WS: Regex = Regex::new(r"[ \t\u{00a0}]+").unwrap();
}

/// Collapse runs of horizontal whitespace (including non-breaking spaces)
/// to a single space and trim the ends.
///
/// Idempotent: normalizing already-normalized text returns the same text.
pub fn normalize(text: &str) -> String {
    HORIZONTAL_WS.replace_all(text, " ").trim().to_string()
}

/// Normalize a multi-line region into one line.
///
/// Line breaks count as whitespace here; used to fold wrapped table-row
/// descriptions before the row pattern is applied.
pub fn flatten(text: &str) -> String {
    let joined = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    normalize(&joined)
}

/// Replace the five common named HTML entities with their literal
/// characters. Page dumps produced from HTML-rendered invoices carry these;
/// no general entity table is consulted.
pub fn unescape_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
