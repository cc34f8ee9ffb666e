pub mod item;
pub mod parsed;

pub use item::{BibRecord, CallNumberScheme, Item};
pub use parsed::{ParsedCallNumber, ShelfKey};
