//! Request record files and the parallel record loader.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use agora_application::ports::{CollectionError, FileSystem, FileSystemError};
use agora_domain::Request;
use tokio::task::JoinSet;
use tracing::warn;

use crate::serialization::{from_yaml_bytes, to_yaml_bytes};

/// File name of the catalog inside a collection directory.
pub const CATALOG_FILE: &str = ".catalog";

/// Extension of request record files.
pub const RECORD_EXTENSION: &str = "yaml";

/// Returns the record path of request `id`.
pub fn record_path(collection_dir: &Path, id: &str) -> PathBuf {
    collection_dir.join(format!("{id}.{RECORD_EXTENSION}"))
}

/// Returns true if `path` names a request record rather than the catalog
/// or an unrelated file.
pub fn is_record_path(path: &Path) -> bool {
    let is_catalog = path.file_name().is_some_and(|name| name == CATALOG_FILE);
    !is_catalog && path.extension().is_some_and(|ext| ext == RECORD_EXTENSION)
}

/// Returns the last path component for error messages.
pub fn label(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

/// Converts a file system error that is not a "missing" case.
pub fn fs_error(error: &FileSystemError) -> CollectionError {
    CollectionError::FileSystem(error.to_string())
}

/// Loads and decodes one record.
///
/// # Errors
///
/// `RequestNotFound` if the file is missing, `Serialization` if it does not
/// decode, `FileSystem` for any other read failure.
pub async fn read_record<F: FileSystem + ?Sized>(
    fs: &F,
    path: &Path,
) -> Result<Request, CollectionError> {
    let bytes = fs.read_file(path).await.map_err(|e| {
        if e.is_not_found() {
            let id = path.file_stem().map_or_else(String::new, |s| s.to_string_lossy().into_owned());
            CollectionError::RequestNotFound(id)
        } else {
            fs_error(&e)
        }
    })?;
    from_yaml_bytes(&bytes)
        .map_err(|e| CollectionError::Serialization(format!("{}: {e}", label(path))))
}

/// Encodes `request` and writes it to its record file, replacing any
/// previous content.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub async fn write_record<F: FileSystem + ?Sized>(
    fs: &F,
    collection_dir: &Path,
    request: &Request,
) -> Result<(), CollectionError> {
    let bytes =
        to_yaml_bytes(request).map_err(|e| CollectionError::Serialization(e.to_string()))?;
    fs.write_file(&record_path(collection_dir, request.id()), &bytes)
        .await
        .map_err(|e| fs_error(&e))
}

/// Reads every path concurrently and returns the records in input order.
///
/// One task is spawned per path. Each task reports its input position, and
/// its result is stored in the slot for that position, so the output order
/// never depends on which read finishes first. All tasks are joined before
/// this returns. If any read failed, the error of the earliest failing
/// position is returned and the other records are discarded.
///
/// There is no bound on the number of concurrent reads.
///
/// # Errors
///
/// Returns the first error in input order.
pub async fn read_records<F: FileSystem + 'static>(
    fs: &Arc<F>,
    paths: Vec<PathBuf>,
) -> Result<Vec<Request>, CollectionError> {
    let mut slots: Vec<Option<Result<Request, CollectionError>>> =
        std::iter::repeat_with(|| None).take(paths.len()).collect();

    let mut tasks = JoinSet::new();
    for (position, path) in paths.into_iter().enumerate() {
        let fs = Arc::clone(fs);
        tasks.spawn(async move { (position, read_record(fs.as_ref(), &path).await) });
    }

    let mut join_failure = None;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((position, result)) => {
                if let Some(slot) = slots.get_mut(position) {
                    *slot = Some(result);
                }
            }
            Err(e) => {
                warn!(error = %e, "record read task failed");
                join_failure.get_or_insert_with(|| CollectionError::Internal(e.to_string()));
            }
        }
    }

    let mut records = Vec::with_capacity(slots.len());
    for slot in slots {
        match slot {
            Some(Ok(request)) => records.push(request),
            Some(Err(e)) => return Err(e),
            None => {
                return Err(join_failure.unwrap_or_else(|| {
                    CollectionError::Internal("record read produced no result".to_string())
                }));
            }
        }
    }
    Ok(records)
}
