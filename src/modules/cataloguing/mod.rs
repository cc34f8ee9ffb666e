// Call Number Cataloguing Module
// Normalization, exclusion, grammar classification, facet labels,
// shelf keys, and preferred-barcode selection.

pub mod classification;
pub mod exclusion;
pub mod labels;
pub mod normalize;
pub mod preferred;
pub mod shelfkey;

pub use classification::classify;
pub use exclusion::{is_excluded, is_online_only, never_classified};
pub use labels::{classification_facet, gov_doc_facet};
pub use normalize::normalize;
pub use preferred::select_preferred;
pub use shelfkey::{lop, lopped_display, shelf_key};
