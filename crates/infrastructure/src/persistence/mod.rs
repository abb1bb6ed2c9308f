//! File system persistence.
//!
//! Layout under the store root:
//!
//! ```text
//! <root>/collections/<collection>/<id>.yaml   one request record
//! <root>/collections/<collection>/.catalog    ordered list of ids
//! ```

mod collection_directory;
mod config_repository;
mod file_system;
#[cfg(test)]
mod memory_fs;
mod records;
mod request_catalog;
mod request_store;

pub use collection_directory::{COLLECTIONS_DIR, CollectionDirectory};
pub use config_repository::{ConfigError, ConfigRepository};
pub use file_system::TokioFileSystem;
pub use records::{CATALOG_FILE, RECORD_EXTENSION, record_path};
pub use request_catalog::RequestCatalog;
pub use request_store::RequestStore;
