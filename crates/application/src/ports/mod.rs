//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait implemented by adapters in the infrastructure layer.

mod collection_repository;
mod file_system;
mod http_client;

pub use collection_repository::{
    CollectionError, CollectionRepository, CollectionRequest, RequestRepository,
};
pub use file_system::{FileSystem, FileSystemError};
pub use http_client::{HttpClient, HttpClientError, HttpFuture};
