//! Text normalization for extracted spans.
//!
//! Extraction noise comes in a few recognizable shapes: runs of one
//! repeated character ("……", "XXXXX"), words run together across a style
//! change ("PageTitle"), and dot-fill leaders from tables of contents.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Dot/dash leader lines, e.g. "......" or "- - - -".
static DOT_FILL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[.\- ]{3,}$").unwrap());

/// Dot/dash leader with a trailing page number, e.g. "...... 12".
static DOT_FILL_PAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[.\- ]{3,}\s*\d{1,4}$").unwrap());

/// Clean a raw text span.
///
/// Returns an empty string for repeated-character noise (one character,
/// ignoring spaces and case, repeated three or more times). Splits
/// lower-to-upper camel-case run-ons, collapses whitespace runs, and trims.
pub fn clean_text(text: &str) -> String {
    let text: String = text.nfc().collect();

    if is_repeated_char_noise(&text) {
        return String::new();
    }

    let split = split_camel_case(&text);
    split.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether the text, spaces stripped, is a single character repeated
/// three or more times (case-insensitive).
fn is_repeated_char_noise(text: &str) -> bool {
    let stripped: Vec<char> = text
        .chars()
        .filter(|c| *c != ' ')
        .flat_map(|c| c.to_lowercase())
        .collect();
    if stripped.len() < 3 {
        return false;
    }
    let first = stripped[0];
    stripped.iter().all(|c| *c == first)
}

/// Insert a space at each lowercase-to-uppercase letter transition.
fn split_camel_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_lower = false;
    for c in text.chars() {
        if prev_lower && c.is_uppercase() {
            result.push(' ');
        }
        prev_lower = c.is_lowercase();
        result.push(c);
    }
    result
}

/// Whether a cleaned line is a dot-fill leader, with or without a
/// trailing page number. These carry no heading content.
pub fn is_dot_fill(text: &str) -> bool {
    DOT_FILL.is_match(text) || DOT_FILL_PAGE.is_match(text)
}
