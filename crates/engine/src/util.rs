//! Internal helpers for text normalization.
//!
//! These utilities centralize the matching key so names, unit synonyms and
//! category patterns all compare the same way.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Build the matching key for a piece of user text.
///
/// Lower-cases, decomposes and drops combining marks, collapses whitespace
/// runs to a single space and trims. `"  Carôtte\tRÂPÉE "` becomes
/// `"carotte rapee"`.
pub fn normalize_key(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_space = false;
    for ch in input.nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        for lower in ch.to_lowercase() {
            out.push(lower);
        }
    }
    out
}

/// Trim optional text, mapping blank values to `None`.
pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}
