//! Services Layer
//!
//! Pure business logic on top of the cataloguing modules. No I/O; callers
//! wire these functions into whatever batch or server surface they run.

pub mod callnumber_service;

// Re-export for convenience
pub use callnumber_service::{index_record, index_records, IndexDoc};
