//! Facet label rendering for classified call numbers.
//!
//! Pure table lookups with graceful fallback: a class or subclass missing
//! from the tables echoes its raw code instead of dropping the facet.

use crate::infrastructure::config::ClassificationConfig;
use crate::models::parsed::ParsedCallNumber;

/// Render the hierarchical facet string for an LC or Dewey parse; `None`
/// for every other variant.
pub fn classification_facet(
    config: &ClassificationConfig,
    parsed: &ParsedCallNumber,
) -> Option<String> {
    match parsed {
        ParsedCallNumber::Lc {
            class_letter,
            subclass,
            ..
        } => Some(lc_facet(config, *class_letter, subclass)),
        ParsedCallNumber::Dewey { hundred, ten, .. } => Some(dewey_facet(config, *hundred, *ten)),
        _ => None,
    }
}

pub fn lc_facet(config: &ClassificationConfig, class_letter: char, subclass: &str) -> String {
    let class_segment = match config.lc_classes.get(&class_letter) {
        Some(label) => format!("{} - {}", class_letter, label),
        None => class_letter.to_string(),
    };
    let subclass_segment = match config.subclass_label(subclass) {
        Some((prefix, label)) => format!("{} - {}", prefix, label),
        // Unmapped subclasses echo the code verbatim.
        None => subclass.to_string(),
    };
    format!("LC Classification|{}|{}", class_segment, subclass_segment)
}

pub fn dewey_facet(config: &ClassificationConfig, hundred: u16, ten: u16) -> String {
    let hundred_segment = match config.dewey_hundreds.get(&hundred) {
        Some(label) => format!("{:03}s - {}", hundred, label),
        None => format!("{:03}s", hundred),
    };
    let ten_segment = match config.dewey_tens.get(&ten) {
        Some(label) => format!("{:03}s - {}", ten, label),
        None => format!("{:03}s", ten),
    };
    format!("Dewey Classification|{}|{}", hundred_segment, ten_segment)
}

pub fn gov_doc_facet(category: &str) -> String {
    format!("Government Document|{}", category)
}
