//! Collection and request repository ports.

use std::future::Future;
use std::path::PathBuf;

use agora_domain::{DomainError, Request};

/// Error type for collection and request storage.
#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    /// Collection not found.
    #[error("Collection not found: {0}")]
    NotFound(String),

    /// Request record not found.
    #[error("Request not found: {0}")]
    RequestNotFound(String),

    /// A collection with that name already exists.
    #[error("Collection already exists: {0}")]
    AlreadyExists(String),

    /// Invalid collection name or request id.
    #[error(transparent)]
    Invalid(#[from] DomainError),

    /// A record or catalog could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File system error.
    #[error("File system error: {0}")]
    FileSystem(String),

    /// A background read task failed to complete.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CollectionError {
    /// Returns true for a missing collection or a missing request.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::RequestNotFound(_))
    }
}

/// A request tagged with the collection that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionRequest {
    /// Owning collection name.
    pub collection: String,
    /// The request.
    pub request: Request,
}

/// Lifecycle of named collections under a root directory.
pub trait CollectionRepository: Send + Sync {
    /// Lists collection names.
    ///
    /// The order follows directory iteration and is not guaranteed to be
    /// stable or sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the collections directory cannot be read.
    fn list_collections(
        &self,
    ) -> impl Future<Output = Result<Vec<String>, CollectionError>> + Send;

    /// Returns the directory of a collection. Performs no I/O.
    fn collection_path(&self, name: &str) -> PathBuf;

    /// Returns true if the collection directory exists.
    fn exists(&self, name: &str) -> impl Future<Output = bool> + Send;

    /// Creates a collection. Creating an existing collection succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or the directory cannot be
    /// created.
    fn create_collection(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<(), CollectionError>> + Send;

    /// Deletes a collection and every request in it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the collection does not exist.
    fn delete_collection(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<(), CollectionError>> + Send;

    /// Renames a collection.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `old` does not exist and `AlreadyExists` if
    /// `new` does.
    fn rename_collection(
        &self,
        old: &str,
        new: &str,
    ) -> impl Future<Output = Result<(), CollectionError>> + Send;
}

/// CRUD over the request records of a collection.
///
/// Listing order is the collection's catalog order, which is creation order
/// unless the catalog was rebuilt from disk.
pub trait RequestRepository: Send + Sync {
    /// Persists a new request and appends it to the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the record or the catalog cannot be written.
    fn create(
        &self,
        collection: &str,
        request: &Request,
    ) -> impl Future<Output = Result<(), CollectionError>> + Send;

    /// Loads one request.
    ///
    /// # Errors
    ///
    /// Returns `RequestNotFound` if no record exists for `id`.
    fn get(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<Request, CollectionError>> + Send;

    /// Loads every request of a collection in catalog order.
    ///
    /// # Errors
    ///
    /// Returns the first failing read, in catalog order, and no partial
    /// result.
    fn list(
        &self,
        collection: &str,
    ) -> impl Future<Output = Result<Vec<Request>, CollectionError>> + Send;

    /// Loads the requests of every collection.
    ///
    /// # Errors
    ///
    /// Returns the first error from listing any collection.
    fn list_all(
        &self,
    ) -> impl Future<Output = Result<Vec<CollectionRequest>, CollectionError>> + Send;

    /// Overwrites an existing request record. The catalog is not touched.
    ///
    /// # Errors
    ///
    /// Returns `RequestNotFound` if no record exists for the request's id.
    fn update(
        &self,
        collection: &str,
        request: &Request,
    ) -> impl Future<Output = Result<(), CollectionError>> + Send;

    /// Removes a request record and its catalog entry.
    ///
    /// Deleting an id that does not exist is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the record or catalog cannot be written.
    fn delete(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<(), CollectionError>> + Send;
}
