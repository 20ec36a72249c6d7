//! Input cleanup for model-generated Markdown.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static RE_OUTER_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^```(?:markdown|md)?[ \t]*\n(.*?)\n?```\s*$").unwrap());

/// Zero-width and formatting characters that render as nothing.
const INVISIBLE_CHARS: [char; 6] = [
    '\u{200B}', // zero-width space
    '\u{200C}', // zero-width non-joiner
    '\u{200D}', // zero-width joiner
    '\u{2060}', // word joiner
    '\u{FEFF}', // BOM
    '\u{00AD}', // soft hyphen
];

/// Normalize Markdown before classification.
///
/// Rules, in order: normalize line endings, strip an outer code fence,
/// remove invisible characters, NFC-normalize.
pub fn clean_markdown(input: &str) -> String {
    let s = normalize_line_endings(input);
    let s = strip_outer_fence(&s);
    let s = remove_invisible_chars(&s);
    s.nfc().collect()
}

fn normalize_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

fn strip_outer_fence(input: &str) -> String {
    match RE_OUTER_FENCE.captures(input.trim()) {
        Some(caps) => caps[1].to_string(),
        None => input.to_string(),
    }
}

fn remove_invisible_chars(input: &str) -> String {
    input.chars().filter(|c| !INVISIBLE_CHARS.contains(c)).collect()
}
