//! Exclusion rules for items that must not be indexed.
//!
//! Every downstream consumer (classifier, shelf keys, preferred barcode)
//! consults these predicates, so inclusion is defined exactly once.
//! Exclusion is monotonic and depends only on the item itself.

use crate::infrastructure::config::ClassificationConfig;
use crate::models::item::{CallNumberScheme, Item};
use crate::modules::cataloguing::normalize::normalize;

/// True when the item is ignored entirely: blank call number, a sentinel
/// text ("NO CALL NUMBER", "INTERNET RESOURCE ...", ...), a lost/missing/
/// withdrawn current location, or a shelved-by-title home location.
pub fn is_excluded(config: &ClassificationConfig, item: &Item) -> bool {
    let text = normalize(item.call_number.as_deref());
    if text.is_empty() {
        return true;
    }

    let upper = text.to_uppercase();
    if config.ignore_sentinels.contains(&upper) {
        return true;
    }
    if config
        .ignore_prefixes
        .iter()
        .any(|prefix| upper.starts_with(prefix.as_str()))
    {
        return true;
    }

    if config.unwanted_locations.contains(&item.current_location) {
        return true;
    }

    if config.shelby_locations.contains(&item.home_location) {
        // Known discrepancy carried over from the legacy indexer: a
        // shelved-by-title home location suppresses the item even when its
        // call number would classify.
        tracing::warn!(
            "shelved-by-title location {} suppresses call number {:?} (barcode {})",
            item.home_location,
            text,
            item.barcode
        );
        return true;
    }

    false
}

/// True when the item is reachable only online. Such items drop out of
/// preferred-barcode selection unless the record carries a browse-level
/// fallback call number.
pub fn is_online_only(config: &ClassificationConfig, item: &Item) -> bool {
    config.online_locations.contains(&item.home_location)
        || config.online_locations.contains(&item.current_location)
}

/// Schemes that never yield an LC or Dewey classification, no matter what
/// their text looks like. ALPHANUM is handled by the classifier itself
/// because of the configured prefix exception; these items remain eligible
/// for shelf-key, display, and barcode purposes.
pub fn never_classified(scheme: CallNumberScheme) -> bool {
    matches!(
        scheme,
        CallNumberScheme::Thesis
            | CallNumberScheme::Xx
            | CallNumberScheme::Other
            | CallNumberScheme::Auto
            | CallNumberScheme::Asis
            | CallNumberScheme::Harvyench
    )
}
