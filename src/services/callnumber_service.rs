//! Call Number Service - Pure business logic without any I/O layer
//!
//! Takes one bibliographic record at a time and derives everything the
//! search index consumes: classification facets, per-item display strings
//! with shelf keys, and the preferred barcode. Stateless apart from the
//! read-only configuration passed in by reference, so batch callers can
//! shard records across threads freely.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::infrastructure::config::ClassificationConfig;
use crate::models::item::{BibRecord, Item};
use crate::models::parsed::{ParsedCallNumber, ShelfKey};
use crate::modules::cataloguing::classification::classify;
use crate::modules::cataloguing::exclusion::is_excluded;
use crate::modules::cataloguing::labels::{classification_facet, gov_doc_facet};
use crate::modules::cataloguing::preferred::select_preferred;
use crate::modules::cataloguing::shelfkey::shelf_key;

/// Everything this subsystem contributes to one record's index document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDoc {
    pub id: String,
    pub lc_facets: Vec<String>,
    pub dewey_facets: Vec<String>,
    pub gov_doc_facets: Vec<String>,
    pub item_display: Vec<String>,
    pub preferred_barcode: Option<String>,
}

/// Index one record. Pure: identical input yields byte-identical output.
pub fn index_record(config: &ClassificationConfig, record: &BibRecord) -> IndexDoc {
    let mut lc_facets = Vec::new();
    let mut dewey_facets = Vec::new();
    let mut gov_doc_facets = Vec::new();
    let mut item_display = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for item in &record.items {
        if is_excluded(config, item) {
            continue;
        }

        let parsed = classify(config, item);

        if let Some(facet) = classification_facet(config, &parsed)
            && seen.insert(facet.clone())
        {
            match &parsed {
                ParsedCallNumber::Lc { .. } => lc_facets.push(facet),
                ParsedCallNumber::Dewey { .. } => dewey_facets.push(facet),
                _ => {}
            }
        }

        if let Some(category) = config.gov_doc_locations.get(&item.home_location) {
            let facet = gov_doc_facet(category);
            if seen.insert(facet.clone()) {
                gov_doc_facets.push(facet);
            }
        }

        if let Some(key) = shelf_key(&parsed) {
            item_display.push(format_item_display(item, &parsed, &key));
        }
    }

    if record.gov_doc_field {
        let facet = gov_doc_facet(&config.default_gov_doc_category);
        if seen.insert(facet.clone()) {
            gov_doc_facets.push(facet);
        }
    }

    let preferred_barcode = select_preferred(config, record);

    tracing::debug!(
        "record {}: {} LC facets, {} Dewey facets, preferred barcode {:?}",
        record.id,
        lc_facets.len(),
        dewey_facets.len(),
        preferred_barcode
    );

    IndexDoc {
        id: record.id.clone(),
        lc_facets,
        dewey_facets,
        gov_doc_facets,
        item_display,
        preferred_barcode,
    }
}

/// Index a batch in input order. Records are independent of one another, so
/// callers may split the slice across worker threads and concatenate.
pub fn index_records(config: &ClassificationConfig, records: &[BibRecord]) -> Vec<IndexDoc> {
    records
        .iter()
        .map(|record| index_record(config, record))
        .collect()
}

// Composite display string consumed by the downstream display layer. Fixed
// column positions; absent public notes render as an empty column.
fn format_item_display(item: &Item, parsed: &ParsedCallNumber, key: &ShelfKey) -> String {
    [
        item.barcode.as_str(),
        item.library.as_str(),
        item.home_location.as_str(),
        item.current_location.as_str(),
        item.public_note.as_deref().unwrap_or(""),
        key.lopped.as_str(),
        key.forward.as_str(),
        key.reverse.as_str(),
        parsed.full().unwrap_or(""),
        key.volume_sort.as_str(),
        parsed.resolved_scheme(),
    ]
    .join(" -|- ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::item::CallNumberScheme;

    #[test]
    fn test_index_record_is_pure() {
        let config = ClassificationConfig::default();
        let record = BibRecord {
            id: "purity".to_string(),
            items: vec![
                Item::new("M123 .M456", CallNumberScheme::Lc, "b1"),
                Item::new("159.32 .W211", CallNumberScheme::Dewey, "b2"),
            ],
            browse_call_number: None,
            gov_doc_field: false,
        };
        let first = index_record(&config, &record);
        let second = index_record(&config, &record);
        assert_eq!(first, second);
    }

    #[test]
    fn test_facets_deduplicate_preserving_first_occurrence() {
        let config = ClassificationConfig::default();
        let record = BibRecord {
            id: "dedup".to_string(),
            items: vec![
                Item::new("M123 .M456", CallNumberScheme::Lc, "b1"),
                Item::new("M200 .M9", CallNumberScheme::Lc, "b2"),
                Item::new("ML410 .B1", CallNumberScheme::Lc, "b3"),
            ],
            browse_call_number: None,
            gov_doc_field: false,
        };
        let doc = index_record(&config, &record);
        assert_eq!(
            doc.lc_facets,
            vec![
                "LC Classification|M - Music|M - Music".to_string(),
                "LC Classification|M - Music|ML - Literature on music".to_string(),
            ]
        );
    }

    #[test]
    fn test_item_display_columns() {
        let config = ClassificationConfig::default();
        let mut item = Item::new("QA76 .C35 V.2", CallNumberScheme::Lc, "b1");
        item.library = "GREEN".to_string();
        item.home_location = "STACKS".to_string();
        item.public_note = Some("Signed by the author".to_string());
        let record = BibRecord {
            id: "display".to_string(),
            items: vec![item],
            browse_call_number: None,
            gov_doc_field: false,
        };
        let doc = index_record(&config, &record);
        assert_eq!(doc.item_display.len(), 1);
        let columns: Vec<&str> = doc.item_display[0].split(" -|- ").collect();
        assert_eq!(columns.len(), 11);
        assert_eq!(columns[0], "b1");
        assert_eq!(columns[1], "GREEN");
        assert_eq!(columns[4], "Signed by the author");
        assert_eq!(columns[5], "QA76 .C35 ...");
        assert_eq!(columns[8], "QA76 .C35 V.2");
        assert_eq!(columns[10], "LC");
    }

    #[test]
    fn test_gov_doc_facets() {
        let config = ClassificationConfig::default();
        let mut fed = Item::new("Y 4.AG 8/1:985", CallNumberScheme::Sudoc, "g1");
        fed.home_location = "FED-DOCS".to_string();
        let record = BibRecord {
            id: "gov".to_string(),
            items: vec![fed],
            browse_call_number: None,
            gov_doc_field: false,
        };
        let doc = index_record(&config, &record);
        assert_eq!(doc.gov_doc_facets, vec!["Government Document|Federal".to_string()]);

        let by_field = BibRecord {
            id: "gov2".to_string(),
            items: vec![],
            browse_call_number: None,
            gov_doc_field: true,
        };
        let doc = index_record(&config, &by_field);
        assert_eq!(doc.gov_doc_facets, vec!["Government Document|Federal".to_string()]);
    }
}
