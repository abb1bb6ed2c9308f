//! Agora Domain - Core types
//!
//! This crate defines the data model for stored HTTP requests and their
//! execution results. All types here are pure Rust with no I/O.

pub mod collection;
pub mod error;
pub mod id;
pub mod request;
pub mod response;
pub mod settings;
pub mod state;

pub use collection::{Catalog, DEFAULT_COLLECTION_NAME};
pub use error::{DomainError, DomainResult};
pub use id::{generate_id, validate_collection_name, validate_id};
pub use request::{
    HttpMethod, KeyValue, KeyValuePairs, Request, is_json, minify_json, prettify_json,
};
pub use response::Response;
pub use settings::StoreConfig;
pub use state::{ExecutionPhase, RequestErrorKind};
