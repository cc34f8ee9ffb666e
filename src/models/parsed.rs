use serde::{Deserialize, Serialize};

use crate::models::item::CallNumberScheme;

/// Outcome of classifying one item's call number. Derived fresh per indexing
/// pass, never persisted; exactly one variant per item, and the variant
/// depends only on the item and the static tables, never on sibling items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ParsedCallNumber {
    Excluded,
    Unclassified {
        raw: String,
    },
    Lc {
        class_letter: char,
        /// The full leading letter run (1-3 letters), e.g. "KFC".
        subclass: String,
        lopped: String,
        full: String,
    },
    Dewey {
        /// Hundred bucket of the canonical 3-digit whole part (0, 100, ... 900).
        hundred: u16,
        /// Ten bucket (0, 10, ... 990).
        ten: u16,
        lopped: String,
        full: String,
    },
    Other {
        scheme: CallNumberScheme,
        lopped: String,
        full: String,
    },
}

impl ParsedCallNumber {
    pub fn lopped(&self) -> Option<&str> {
        match self {
            Self::Lc { lopped, .. } | Self::Dewey { lopped, .. } | Self::Other { lopped, .. } => {
                Some(lopped)
            }
            Self::Unclassified { raw } => Some(raw),
            Self::Excluded => None,
        }
    }

    pub fn full(&self) -> Option<&str> {
        match self {
            Self::Lc { full, .. } | Self::Dewey { full, .. } | Self::Other { full, .. } => {
                Some(full)
            }
            Self::Unclassified { raw } => Some(raw),
            Self::Excluded => None,
        }
    }

    /// Scheme as resolved by the grammars, for display and ranking. Differs
    /// from the upstream tag whenever the tag lied.
    pub fn resolved_scheme(&self) -> &'static str {
        match self {
            Self::Lc { .. } => "LC",
            Self::Dewey { .. } => "DEWEY",
            Self::Other { scheme, .. } => match scheme {
                CallNumberScheme::Sudoc => "SUDOC",
                CallNumberScheme::Alphanum => "ALPHANUM",
                _ => "OTHER",
            },
            Self::Unclassified { .. } | Self::Excluded => "OTHER",
        }
    }
}

/// Sortable shelf encodings of one (lopped) call number. All plain strings,
/// byte-comparable: ascending `forward` order is physical shelf order, and
/// `reverse` sorts in exactly the opposite order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShelfKey {
    pub lopped: String,
    pub forward: String,
    pub reverse: String,
    /// Numeric-aware encoding of the stripped volume/part/date suffix, used
    /// as a secondary sort among items sharing a lopped base. Empty when
    /// nothing was lopped.
    pub volume_sort: String,
}
