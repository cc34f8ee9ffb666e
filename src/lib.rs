pub mod infrastructure;
pub mod models;
pub mod modules;
pub mod services;

// Re-exports for the common call sites
pub use infrastructure::config;
pub use infrastructure::config::ClassificationConfig;
pub use infrastructure::seed;
pub use models::{BibRecord, CallNumberScheme, Item, ParsedCallNumber, ShelfKey};
pub use modules::cataloguing;
pub use services::callnumber_service;
