//! Lexical normalization of raw call-number text.
//!
//! Decades of retrospective conversion left call numbers with doubled
//! spaces, stray tabs, and placeholder strings of periods. Everything
//! downstream works on the normalized form produced here.

use unicode_normalization::UnicodeNormalization;

/// Collapse whitespace runs to single spaces and trim. A string consisting
/// solely of periods and spaces normalizes to the empty string, which is the
/// blank sentinel consumed by the exclusion predicate. Never fails.
pub fn normalize(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };

    let composed: String = raw.nfc().collect();
    let collapsed = composed.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().all(|c| c == '.' || c == ' ') {
        return String::new();
    }
    collapsed
}
