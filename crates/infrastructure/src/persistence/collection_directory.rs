//! Collections as directories under `<root>/collections`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use agora_application::ports::{CollectionError, CollectionRepository, FileSystem};
use agora_domain::validate_collection_name;
use tracing::debug;

use super::records::fs_error;

/// Name of the directory under the root that holds collections.
pub const COLLECTIONS_DIR: &str = "collections";

/// File system backed collection lifecycle.
#[derive(Debug)]
pub struct CollectionDirectory<F: FileSystem> {
    fs: Arc<F>,
    root: PathBuf,
}

impl<F: FileSystem> CollectionDirectory<F> {
    /// Creates a collection directory rooted at `root`.
    #[must_use]
    pub fn new(fs: Arc<F>, root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            root: root.into(),
        }
    }

    /// Returns the store root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns `<root>/collections`.
    #[must_use]
    pub fn collections_dir(&self) -> PathBuf {
        self.root.join(COLLECTIONS_DIR)
    }
}

impl<F: FileSystem> CollectionRepository for CollectionDirectory<F> {
    async fn list_collections(&self) -> Result<Vec<String>, CollectionError> {
        let entries = match self.fs.read_dir(&self.collections_dir()).await {
            Ok(entries) => entries,
            Err(e) if e.is_not_found() => return Ok(Vec::new()),
            Err(e) => return Err(fs_error(&e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            if !self.fs.is_dir(&entry).await {
                continue;
            }
            let Some(name) = entry.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if validate_collection_name(name).is_err() {
                debug!(entry = %entry.display(), "Skipping directory that is not a collection");
                continue;
            }
            names.push(name.to_string());
        }
        Ok(names)
    }

    fn collection_path(&self, name: &str) -> PathBuf {
        self.collections_dir().join(name)
    }

    async fn exists(&self, name: &str) -> bool {
        self.fs.is_dir(&self.collection_path(name)).await
    }

    async fn create_collection(&self, name: &str) -> Result<(), CollectionError> {
        validate_collection_name(name)?;
        self.fs
            .create_dir_all(&self.collection_path(name))
            .await
            .map_err(|e| fs_error(&e))?;
        debug!(collection = name, "Collection created");
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> Result<(), CollectionError> {
        validate_collection_name(name)?;
        self.fs
            .remove_dir_all(&self.collection_path(name))
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    CollectionError::NotFound(name.to_string())
                } else {
                    fs_error(&e)
                }
            })?;
        debug!(collection = name, "Collection deleted");
        Ok(())
    }

    async fn rename_collection(&self, old: &str, new: &str) -> Result<(), CollectionError> {
        validate_collection_name(old)?;
        validate_collection_name(new)?;
        if !self.exists(old).await {
            return Err(CollectionError::NotFound(old.to_string()));
        }
        if self.fs.exists(&self.collection_path(new)).await {
            return Err(CollectionError::AlreadyExists(new.to_string()));
        }
        self.fs
            .rename(&self.collection_path(old), &self.collection_path(new))
            .await
            .map_err(|e| fs_error(&e))?;
        debug!(from = old, to = new, "Collection renamed");
        Ok(())
    }
}
