//! Request CRUD on top of collection directories and catalogs.

use std::path::PathBuf;
use std::sync::Arc;

use agora_application::ports::{
    CollectionError, CollectionRepository, CollectionRequest, FileSystem, RequestRepository,
};
use agora_domain::{Request, StoreConfig, validate_collection_name, validate_id};
use tracing::debug;

use super::collection_directory::CollectionDirectory;
use super::records::{fs_error, read_record, read_records, record_path, write_record};
use super::request_catalog::RequestCatalog;

/// The request store.
///
/// Each request is one YAML record file; each collection keeps a catalog
/// that fixes the listing order. A record is written before its catalog
/// entry and removed before its catalog entry is dropped, so the catalog
/// never lists an id whose record was never written.
#[derive(Debug)]
pub struct RequestStore<F: FileSystem> {
    fs: Arc<F>,
    directory: CollectionDirectory<F>,
    catalog: RequestCatalog<F>,
}

impl<F: FileSystem + 'static> RequestStore<F> {
    /// Creates a store rooted at `root`. Performs no I/O.
    #[must_use]
    pub fn new(fs: F, root: impl Into<PathBuf>) -> Self {
        Self::with_shared(Arc::new(fs), root)
    }

    /// Creates a store over a file system shared with other components.
    #[must_use]
    pub fn with_shared(fs: Arc<F>, root: impl Into<PathBuf>) -> Self {
        Self {
            directory: CollectionDirectory::new(Arc::clone(&fs), root),
            catalog: RequestCatalog::new(Arc::clone(&fs)),
            fs,
        }
    }

    /// Opens the store described by `config` and creates its default
    /// collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the default collection cannot be created.
    pub async fn open(fs: F, config: &StoreConfig) -> Result<Self, CollectionError> {
        let store = Self::new(fs, config.root.clone());
        store
            .directory
            .create_collection(&config.default_collection)
            .await?;
        debug!(root = %config.root.display(), "Request store opened");
        Ok(store)
    }

    /// Returns the collection lifecycle half of the store.
    #[must_use]
    pub const fn directory(&self) -> &CollectionDirectory<F> {
        &self.directory
    }

    /// Returns the catalog accessor.
    #[must_use]
    pub const fn catalog(&self) -> &RequestCatalog<F> {
        &self.catalog
    }
}

impl<F: FileSystem + 'static> RequestRepository for RequestStore<F> {
    async fn create(&self, collection: &str, request: &Request) -> Result<(), CollectionError> {
        validate_collection_name(collection)?;
        validate_id(request.id())?;
        let dir = self.directory.collection_path(collection);
        write_record(self.fs.as_ref(), &dir, request).await?;
        self.catalog.append(&dir, request.id()).await?;
        debug!(collection, id = request.id(), "Request created");
        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Request, CollectionError> {
        validate_collection_name(collection)?;
        validate_id(id)?;
        let dir = self.directory.collection_path(collection);
        read_record(self.fs.as_ref(), &record_path(&dir, id)).await
    }

    async fn list(&self, collection: &str) -> Result<Vec<Request>, CollectionError> {
        validate_collection_name(collection)?;
        let dir = self.directory.collection_path(collection);
        let catalog = self.catalog.read(&dir).await?;
        let paths = catalog.ids().iter().map(|id| record_path(&dir, id)).collect();
        read_records(&self.fs, paths).await
    }

    async fn list_all(&self) -> Result<Vec<CollectionRequest>, CollectionError> {
        let mut all = Vec::new();
        for collection in self.directory.list_collections().await? {
            let requests = self.list(&collection).await?;
            all.extend(requests.into_iter().map(|request| CollectionRequest {
                collection: collection.clone(),
                request,
            }));
        }
        Ok(all)
    }

    async fn update(&self, collection: &str, request: &Request) -> Result<(), CollectionError> {
        validate_collection_name(collection)?;
        validate_id(request.id())?;
        let dir = self.directory.collection_path(collection);
        if !self.fs.is_file(&record_path(&dir, request.id())).await {
            return Err(CollectionError::RequestNotFound(request.id().to_string()));
        }
        write_record(self.fs.as_ref(), &dir, request).await?;
        debug!(collection, id = request.id(), "Request updated");
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), CollectionError> {
        validate_collection_name(collection)?;
        validate_id(id)?;
        let dir = self.directory.collection_path(collection);
        match self.fs.remove_file(&record_path(&dir, id)).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => debug!(collection, id, "Request record already absent"),
            Err(e) => return Err(fs_error(&e)),
        }
        self.catalog.remove(&dir, id).await?;
        debug!(collection, id, "Request deleted");
        Ok(())
    }
}
