//! Embedded seed data for the classification tables.
//!
//! The four label tables ship as CSVs compiled into the binary; location
//! sets, sentinels, and library priority are seeded here in code. Everything
//! can be overridden at startup through `ClassificationConfig::from_json_file`.

use std::collections::{HashMap, HashSet};

use regex::RegexSet;
use serde::Deserialize;

use crate::infrastructure::config::ClassificationConfig;

const LC_CLASSES_CSV: &str = include_str!("../../data/lc_classes.csv");
const LC_SUBCLASSES_CSV: &str = include_str!("../../data/lc_subclasses.csv");
const DEWEY_HUNDREDS_CSV: &str = include_str!("../../data/dewey_hundreds.csv");
const DEWEY_TENS_CSV: &str = include_str!("../../data/dewey_tens.csv");

#[derive(Debug, Deserialize)]
struct LabelRow {
    code: String,
    label: String,
}

#[derive(Debug, Deserialize)]
struct BucketRow {
    bucket: u16,
    label: String,
}

fn parse_label_table(content: &str) -> HashMap<String, String> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let mut table = HashMap::new();
    for result in rdr.deserialize() {
        let row: LabelRow = result.expect("embedded label table is well-formed");
        table.insert(row.code, row.label);
    }
    table
}

fn parse_bucket_table(content: &str) -> HashMap<u16, String> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let mut table = HashMap::new();
    for result in rdr.deserialize() {
        let row: BucketRow = result.expect("embedded bucket table is well-formed");
        table.insert(row.bucket, row.label);
    }
    table
}

fn string_set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Build the full seeded configuration. Called once per process through
/// `ClassificationConfig::default()`.
pub fn default_config() -> ClassificationConfig {
    let lc_classes: HashMap<char, String> = parse_label_table(LC_CLASSES_CSV)
        .into_iter()
        .filter_map(|(code, label)| code.chars().next().map(|c| (c, label)))
        .collect();

    let lc_deny_patterns = vec![
        // Letter-prefixed accession numbers: a long digit run with no Cutter.
        r"^[A-Z]{1,3}\d{6,}".to_string(),
        // Phonorecord accession numbers.
        r"^(LP|PHONO) ?\d+".to_string(),
    ];
    let lc_deny =
        RegexSet::new(&lc_deny_patterns).expect("seed deny-list patterns compile");

    let mut gov_doc_locations = HashMap::new();
    gov_doc_locations.insert("FED-DOCS".to_string(), "Federal".to_string());
    gov_doc_locations.insert("SSRC-DOCS".to_string(), "Federal".to_string());
    gov_doc_locations.insert("CALIF-DOCS".to_string(), "California State".to_string());
    gov_doc_locations.insert("INTL-DOCS".to_string(), "International".to_string());
    gov_doc_locations.insert("BRIT-DOCS".to_string(), "British".to_string());

    ClassificationConfig {
        lc_classes,
        lc_subclasses: parse_label_table(LC_SUBCLASSES_CSV),
        dewey_hundreds: parse_bucket_table(DEWEY_HUNDREDS_CSV),
        dewey_tens: parse_bucket_table(DEWEY_TENS_CSV),
        ignore_sentinels: string_set(&[
            "NO CALL NUMBER",
            "UNCAT",
            "UNCATALOGED",
            "UNCATALOGUED",
            "IN PROCESS",
            "ON ORDER",
            "XX",
        ]),
        ignore_prefixes: vec!["INTERNET RESOURCE".to_string(), "XX(".to_string()],
        unwanted_locations: string_set(&[
            "MISSING",
            "LOST",
            "LOST-ASSUM",
            "LOST-CLAIM",
            "LOST-PAID",
            "WITHDRAWN",
            "DISCARD",
        ]),
        shelby_locations: string_set(&["SHELBYTITL", "SHELBYSER", "STORBYTITL"]),
        online_locations: string_set(&["INTERNET", "ONLINE-TXT", "EDOC", "E-RESV"]),
        gov_doc_locations,
        default_gov_doc_category: "Federal".to_string(),
        lc_deny_patterns,
        relaxed_lc_libraries: string_set(&["LANE-MED", "LANE"]),
        // Catalog-specific; no universal default exists for ALPHANUM
        // collections that carry real classifications.
        alphanum_class_prefixes: HashSet::new(),
        home_library: Some("GREEN".to_string()),
        lc_deny,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_tables_load() {
        let config = default_config();
        assert_eq!(config.lc_classes.get(&'M').map(String::as_str), Some("Music"));
        assert_eq!(config.lc_classes.get(&'K').map(String::as_str), Some("Law"));
        assert_eq!(config.dewey_hundreds.len(), 10);
        assert_eq!(config.dewey_tens.len(), 100);
        assert_eq!(
            config.dewey_tens.get(&150).map(String::as_str),
            Some("Psychology")
        );
        assert_eq!(
            config.dewey_hundreds.get(&100).map(String::as_str),
            Some("Philosophy & Psychology")
        );
    }

    #[test]
    fn test_seed_deny_list_compiles_and_matches() {
        let config = default_config();
        assert!(config.lc_denied("X725164"));
        assert!(config.lc_denied("LP 2331"));
        assert!(!config.lc_denied("QA76.73 .R87"));
    }
}
