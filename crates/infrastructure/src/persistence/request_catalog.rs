//! Per-collection catalog of request ids.
//!
//! The catalog is the only source of listing order. Record files are never
//! listed directly except to rebuild a missing catalog.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use agora_application::ports::{CollectionError, FileSystem};
use agora_domain::Catalog;
use tracing::{debug, info, warn};

use super::records::{CATALOG_FILE, fs_error, is_record_path, label, read_records};
use crate::serialization::{from_yaml_bytes, to_yaml_bytes};

/// Reads and writes the `.catalog` file of collection directories.
#[derive(Debug)]
pub struct RequestCatalog<F: FileSystem> {
    fs: Arc<F>,
}

impl<F: FileSystem + 'static> RequestCatalog<F> {
    /// Creates a catalog accessor over `fs`.
    #[must_use]
    pub const fn new(fs: Arc<F>) -> Self {
        Self { fs }
    }

    /// Returns the catalog path of a collection directory.
    #[must_use]
    pub fn catalog_path(collection_dir: &Path) -> PathBuf {
        collection_dir.join(CATALOG_FILE)
    }

    /// Makes sure the collection has a catalog.
    ///
    /// When the catalog is missing it is rebuilt from the record files in
    /// the directory. Every record is read and its own id is used, in
    /// directory iteration order. Files that are not records are skipped.
    /// If two records store the same id, only the first is listed and a
    /// warning names the other file.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the collection directory is missing, or the
    /// first error from reading a record.
    pub async fn ensure_exists(&self, collection_dir: &Path) -> Result<(), CollectionError> {
        if self.fs.exists(&Self::catalog_path(collection_dir)).await {
            return Ok(());
        }

        let entries = self.fs.read_dir(collection_dir).await.map_err(|e| {
            if e.is_not_found() {
                CollectionError::NotFound(label(collection_dir))
            } else {
                fs_error(&e)
            }
        })?;

        let mut record_paths = Vec::new();
        for entry in entries {
            if is_record_path(&entry) && self.fs.is_file(&entry).await {
                record_paths.push(entry);
            }
        }

        let requests = read_records(&self.fs, record_paths.clone()).await?;
        let mut catalog = Catalog::new();
        for (request, path) in requests.iter().zip(&record_paths) {
            if !catalog.append(request.id()) {
                warn!(
                    collection = %label(collection_dir),
                    id = request.id(),
                    file = %label(path),
                    "Record repeats an id already in the catalog; skipping it"
                );
            }
        }
        info!(
            collection = %label(collection_dir),
            entries = catalog.len(),
            "Rebuilt missing catalog from records"
        );
        self.persist(collection_dir, &catalog).await
    }

    /// Loads the catalog, rebuilding it first if it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be rebuilt, read or decoded.
    pub async fn read(&self, collection_dir: &Path) -> Result<Catalog, CollectionError> {
        self.ensure_exists(collection_dir).await?;
        let path = Self::catalog_path(collection_dir);
        let bytes = self.fs.read_file(&path).await.map_err(|e| fs_error(&e))?;
        from_yaml_bytes(&bytes)
            .map_err(|e| CollectionError::Serialization(format!("{}: {e}", path.display())))
    }

    /// Appends `id` unless it is already listed.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read or written.
    pub async fn append(&self, collection_dir: &Path, id: &str) -> Result<(), CollectionError> {
        let mut catalog = self.read(collection_dir).await?;
        if catalog.append(id) {
            self.persist(collection_dir, &catalog).await
        } else {
            debug!(id, "Catalog already lists request");
            Ok(())
        }
    }

    /// Removes `id` if it is listed.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read or written.
    pub async fn remove(&self, collection_dir: &Path, id: &str) -> Result<(), CollectionError> {
        let mut catalog = self.read(collection_dir).await?;
        if catalog.remove(id) {
            self.persist(collection_dir, &catalog).await
        } else {
            Ok(())
        }
    }

    /// Overwrites the catalog file with `catalog`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub async fn persist(
        &self,
        collection_dir: &Path,
        catalog: &Catalog,
    ) -> Result<(), CollectionError> {
        let bytes =
            to_yaml_bytes(catalog).map_err(|e| CollectionError::Serialization(e.to_string()))?;
        self.fs
            .write_file(&Self::catalog_path(collection_dir), &bytes)
            .await
            .map_err(|e| fs_error(&e))
    }
}
