//! Store configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::collection::DEFAULT_COLLECTION_NAME;

/// Directory under the user's home that holds all collections by default.
const DEFAULT_ROOT_DIR: &str = ".agora";

/// Configuration for opening a request store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Root directory; collections live under `<root>/collections`.
    pub root: PathBuf,
    /// Collection created when the store is opened.
    pub default_collection: String,
}

impl StoreConfig {
    /// Creates a config rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            default_collection: DEFAULT_COLLECTION_NAME.to_string(),
        }
    }

    /// Returns `<home>/.agora`, if the home directory is known.
    #[must_use]
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(DEFAULT_ROOT_DIR))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(Self::default_root().unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT_DIR)))
    }
}
