//! In-memory file system for store tests.
//!
//! Reads can be delayed per path so tests control the order in which
//! concurrent reads complete.

#![allow(clippy::unwrap_used)]

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use agora_application::ports::{FileSystem, FileSystemError};

#[derive(Debug, Default)]
struct State {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
    read_delays: HashMap<PathBuf, Duration>,
    failing_reads: HashSet<PathBuf>,
    completed_reads: Vec<PathBuf>,
}

impl State {
    fn add_dir(&mut self, path: &Path) {
        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                self.dirs.insert(ancestor.to_path_buf());
            }
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.dirs.contains(path)
    }
}

#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    state: Mutex<State>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Writes a file directly, bypassing the async API.
    pub fn insert_file(&self, path: &Path, contents: &[u8]) {
        let mut state = self.state();
        if let Some(parent) = path.parent() {
            state.add_dir(parent);
        }
        state.files.insert(path.to_path_buf(), contents.to_vec());
    }

    pub fn set_read_delay(&self, path: &Path, delay: Duration) {
        self.state().read_delays.insert(path.to_path_buf(), delay);
    }

    /// Makes every read of `path` fail with an IO error.
    pub fn fail_reads(&self, path: &Path) {
        self.state().failing_reads.insert(path.to_path_buf());
    }

    /// Paths of successful reads, in completion order.
    pub fn completed_reads(&self) -> Vec<PathBuf> {
        self.state().completed_reads.clone()
    }

    pub fn contains_file(&self, path: &Path) -> bool {
        self.state().files.contains_key(path)
    }
}

impl FileSystem for MemoryFileSystem {
    async fn read_file(&self, path: &Path) -> Result<Vec<u8>, FileSystemError> {
        let delay = { self.state().read_delays.get(path).copied() };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state();
        if state.failing_reads.contains(path) {
            return Err(FileSystemError::Io(io::Error::other("injected read failure")));
        }
        let contents = state
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| FileSystemError::NotFound(path.to_path_buf()))?;
        state.completed_reads.push(path.to_path_buf());
        Ok(contents)
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), FileSystemError> {
        self.insert_file(path, contents);
        Ok(())
    }

    async fn create_dir_all(&self, path: &Path) -> Result<(), FileSystemError> {
        self.state().add_dir(path);
        Ok(())
    }

    async fn exists(&self, path: &Path) -> bool {
        self.state().exists(path)
    }

    async fn is_dir(&self, path: &Path) -> bool {
        self.state().dirs.contains(path)
    }

    async fn is_file(&self, path: &Path) -> bool {
        self.state().files.contains_key(path)
    }

    async fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>, FileSystemError> {
        let state = self.state();
        if !state.dirs.contains(path) {
            return Err(FileSystemError::NotFound(path.to_path_buf()));
        }
        let children = state
            .files
            .keys()
            .chain(state.dirs.iter())
            .filter(|entry| entry.parent() == Some(path))
            .cloned()
            .collect();
        Ok(children)
    }

    async fn remove_file(&self, path: &Path) -> Result<(), FileSystemError> {
        self.state()
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| FileSystemError::NotFound(path.to_path_buf()))
    }

    async fn remove_dir_all(&self, path: &Path) -> Result<(), FileSystemError> {
        let mut state = self.state();
        if !state.dirs.contains(path) {
            return Err(FileSystemError::NotFound(path.to_path_buf()));
        }
        state.files.retain(|file, _| !file.starts_with(path));
        state.dirs.retain(|dir| !dir.starts_with(path));
        Ok(())
    }

    async fn rename(&self, from: &Path, to: &Path) -> Result<(), FileSystemError> {
        let mut state = self.state();
        if !state.exists(from) {
            return Err(FileSystemError::NotFound(from.to_path_buf()));
        }
        let moved = |path: &Path| match path.strip_prefix(from) {
            Ok(rest) if rest.as_os_str().is_empty() => to.to_path_buf(),
            Ok(rest) => to.join(rest),
            Err(_) => path.to_path_buf(),
        };
        state.files = std::mem::take(&mut state.files)
            .into_iter()
            .map(|(path, contents)| (moved(&path), contents))
            .collect();
        state.dirs = std::mem::take(&mut state.dirs)
            .into_iter()
            .map(|dir| moved(&dir))
            .collect();
        Ok(())
    }
}
