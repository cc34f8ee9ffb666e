//! Preferred-barcode selection: one representative item per record.
//!
//! The six tie-break levels are folded into a single multi-key comparator
//! so the ordering is total and auditable; no pair of distinct candidates
//! ever compares as unordered, which keeps the choice deterministic however
//! the eligible set is permuted upstream.

use std::collections::HashMap;

use crate::infrastructure::config::ClassificationConfig;
use crate::models::item::{BibRecord, CallNumberScheme};
use crate::models::parsed::ParsedCallNumber;
use crate::modules::cataloguing::classification::classify;
use crate::modules::cataloguing::exclusion::{is_excluded, is_online_only};
use crate::modules::cataloguing::shelfkey::{lop, shelf_key};

struct Candidate {
    scheme_rank: u8,
    lopped: String,
    truncated: bool,
    forward_len: usize,
    library: String,
    original_index: usize,
    barcode: String,
}

// LC > Dewey > SUDOC > ALPHANUM > everything else.
fn scheme_rank(parsed: &ParsedCallNumber) -> u8 {
    match parsed {
        ParsedCallNumber::Lc { .. } => 0,
        ParsedCallNumber::Dewey { .. } => 1,
        ParsedCallNumber::Other {
            scheme: CallNumberScheme::Sudoc,
            ..
        } => 2,
        ParsedCallNumber::Other {
            scheme: CallNumberScheme::Alphanum,
            ..
        } => 3,
        _ => 4,
    }
}

fn library_rank<'a>(config: &ClassificationConfig, library: &'a str) -> (u8, &'a str) {
    if config.home_library.as_deref() == Some(library) {
        (0, "")
    } else {
        (1, library)
    }
}

/// Choose the barcode that represents this record, or `None` when no
/// eligible item exists.
pub fn select_preferred(config: &ClassificationConfig, record: &BibRecord) -> Option<String> {
    let mut candidates = Vec::new();

    for (index, item) in record.items.iter().enumerate() {
        // Online-only holdings have no shelf presence of their own; they
        // participate only through the record-level browse call number,
        // which replaces their own text (usually a sentinel) outright.
        let parsed = if is_online_only(config, item) {
            let Some(fallback) = record.browse_call_number.as_deref() else {
                continue;
            };
            let mut substituted = item.clone();
            substituted.call_number = Some(fallback.to_string());
            substituted.scheme = CallNumberScheme::Lc;
            classify(config, &substituted)
        } else {
            if is_excluded(config, item) {
                continue;
            }
            classify(config, item)
        };

        if matches!(parsed, ParsedCallNumber::Excluded) {
            continue;
        }
        let Some(key) = shelf_key(&parsed) else {
            continue;
        };
        let truncated = parsed
            .full()
            .map(|full| !lop(full).1.is_empty())
            .unwrap_or(false);

        candidates.push(Candidate {
            scheme_rank: scheme_rank(&parsed),
            lopped: key.lopped,
            truncated,
            forward_len: key.forward.len(),
            library: item.library.clone(),
            original_index: index,
            barcode: item.barcode.clone(),
        });
    }

    if candidates.is_empty() {
        return None;
    }

    // Level 1: only the highest-priority scheme present survives.
    let best_rank = candidates.iter().map(|c| c.scheme_rank).min()?;
    candidates.retain(|c| c.scheme_rank == best_rank);

    // Level 2: group by identical lopped call number.
    let mut group_sizes: HashMap<String, usize> = HashMap::new();
    for candidate in &candidates {
        *group_sizes.entry(candidate.lopped.clone()).or_insert(0) += 1;
    }

    // Levels 3-7 as one total order.
    candidates.sort_by(|a, b| {
        let a_size = group_sizes[&a.lopped];
        let b_size = group_sizes[&b.lopped];
        let a_untruncated = a_size == 1 && !a.truncated;
        let b_untruncated = b_size == 1 && !b.truncated;

        b_untruncated
            .cmp(&a_untruncated)
            .then_with(|| b_size.cmp(&a_size))
            .then_with(|| a.forward_len.cmp(&b.forward_len))
            .then_with(|| library_rank(config, &a.library).cmp(&library_rank(config, &b.library)))
            .then_with(|| a.original_index.cmp(&b.original_index))
    });

    candidates.into_iter().next().map(|c| c.barcode)
}
