//! Collection-level types

mod catalog;

pub use catalog::Catalog;

/// Name of the collection created when the store is first opened.
pub const DEFAULT_COLLECTION_NAME: &str = "default";
