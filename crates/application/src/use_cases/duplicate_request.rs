//! Duplicate request use case.

use agora_domain::Request;
use tracing::debug;

use crate::ports::{CollectionError, RequestRepository};

/// Use case for copying a stored request under a new id.
///
/// The copy is appended to the end of the same collection.
pub struct DuplicateRequest<R: RequestRepository> {
    requests: R,
}

impl<R: RequestRepository> DuplicateRequest<R> {
    /// Creates a new `DuplicateRequest` use case.
    #[must_use]
    pub const fn new(requests: R) -> Self {
        Self { requests }
    }

    /// Loads `id` from `collection`, stores a copy with a fresh id and
    /// returns the copy.
    ///
    /// # Errors
    ///
    /// Returns `RequestNotFound` if the source does not exist, or any error
    /// raised while creating the copy.
    pub async fn execute(&self, collection: &str, id: &str) -> Result<Request, CollectionError> {
        let source = self.requests.get(collection, id).await?;
        let copy = source.duplicate();
        self.requests.create(collection, &copy).await?;
        debug!(collection, source = id, copy = copy.id(), "request duplicated");
        Ok(copy)
    }
}
