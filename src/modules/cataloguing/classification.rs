//! Grammar-driven call-number classification.
//!
//! Upstream scheme tags are decades of cataloging practice and cannot be
//! trusted, so classification is attempted by grammar: every eligible string
//! is tried against the LC grammar and, failing that, the Dewey grammar,
//! whatever the tag claims. Only definitively non-bibliographic schemes
//! (thesis numbers, accession schemes, Harvard-Yenching, ...) skip the
//! grammars entirely.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::infrastructure::config::ClassificationConfig;
use crate::models::item::{CallNumberScheme, Item};
use crate::models::parsed::ParsedCallNumber;
use crate::modules::cataloguing::exclusion::{is_excluded, never_classified};
use crate::modules::cataloguing::normalize::normalize;
use crate::modules::cataloguing::shelfkey::lopped_display;

// 1-3 leading letters, a class number (optionally decimal), then the rest.
static LC_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z]{1,3}) ?(\d+(?:\.\d+)?)\s*(.*)$").expect("LC pattern compiles"));

// A Cutter group: optional period, one letter, digits.
static CUTTER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\.? ?[A-Z]\d+").expect("Cutter pattern compiles"));

// 1-3 digit whole part, optional fraction, optional Cutter with trailing
// volume/date tokens.
static DEWEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,3})(\.\d+)?(?: ?\.?([A-Z]\d+.*))?$").expect("Dewey pattern compiles")
});

/// Classify one item. Total: unparseable input yields `Unclassified`, not an
/// error, and excluded items yield `Excluded`.
pub fn classify(config: &ClassificationConfig, item: &Item) -> ParsedCallNumber {
    if is_excluded(config, item) {
        return ParsedCallNumber::Excluded;
    }

    let text = normalize(item.call_number.as_deref());
    let scheme = item.scheme;

    let tries_grammars = if never_classified(scheme) {
        false
    } else if scheme == CallNumberScheme::Alphanum {
        alphanum_exception(config, &text)
    } else {
        true
    };

    if tries_grammars {
        if let Some((class_letter, subclass)) = parse_lc(config, &text, &item.library) {
            return ParsedCallNumber::Lc {
                class_letter,
                subclass,
                lopped: lopped_display(&text),
                full: text,
            };
        }
        if let Some((hundred, ten)) = parse_dewey(&text) {
            return ParsedCallNumber::Dewey {
                hundred,
                ten,
                lopped: lopped_display(&text),
                full: text,
            };
        }
    }

    if scheme.is_lc_tag() || scheme.is_dewey_tag() {
        tracing::debug!(
            "call number {:?} failed both grammars despite {} tag",
            text,
            scheme.as_str()
        );
        return ParsedCallNumber::Unclassified { raw: text };
    }

    ParsedCallNumber::Other {
        scheme,
        lopped: lopped_display(&text),
        full: text,
    }
}

/// Validate against the LC grammar. Returns the class letter and the full
/// leading letter run (the subclass code).
pub fn parse_lc(
    config: &ClassificationConfig,
    text: &str,
    library: &str,
) -> Option<(char, String)> {
    if text.starts_with('(') {
        return None;
    }

    let upper = text.to_uppercase();
    if config.lc_denied(&upper) {
        return None;
    }

    let caps = LC_PATTERN.captures(&upper)?;
    let letters = caps[1].to_string();
    let rest = caps.get(3).map(|m| m.as_str()).unwrap_or("");

    // A valid LC call number carries at least one Cutter after the class
    // number; libraries in the relaxed set shelve bare class numbers.
    if !CUTTER_PATTERN.is_match(rest) && !config.relaxed_lc_libraries.contains(library) {
        return None;
    }

    let class_letter = letters.chars().next()?;
    Some((class_letter, letters))
}

/// Validate against the Dewey grammar. Returns the hundred and ten buckets
/// of the 3-digit canonical whole part ("2" and "002" are the same number).
pub fn parse_dewey(text: &str) -> Option<(u16, u16)> {
    let upper = text.to_uppercase();
    let caps = DEWEY_PATTERN.captures(&upper)?;
    let whole: u16 = caps[1].parse().ok()?;
    Some(((whole / 100) * 100, (whole / 10) * 10))
}

fn alphanum_exception(config: &ClassificationConfig, text: &str) -> bool {
    let Some(first) = text.split_whitespace().next() else {
        return false;
    };
    config.alphanum_class_prefixes.contains(&first.to_uppercase())
}
