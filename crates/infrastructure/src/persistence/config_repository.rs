//! Store configuration persistence.
//!
//! The configuration lives in the platform config directory:
//! - Linux: ~/.config/agora/config.yaml
//! - macOS: ~/Library/Application Support/agora/config.yaml
//! - Windows: %APPDATA%/agora/config.yaml

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use agora_domain::StoreConfig;
use tokio::fs;
use tracing::debug;

use crate::serialization::{SerializationError, from_yaml_bytes, to_yaml_bytes};

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file does not hold a valid configuration.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// Could not determine the config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Loads and saves [`StoreConfig`] as YAML.
#[derive(Debug, Clone, Default)]
pub struct ConfigRepository {
    path: Option<PathBuf>,
}

impl ConfigRepository {
    /// Uses the platform config location.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: dirs::config_dir().map(|dir| dir.join("agora").join("config.yaml")),
        }
    }

    /// Uses an explicit file.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Returns the configuration file path, if one could be determined.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Loads the configuration.
    ///
    /// Returns the default configuration if the file does not exist or no
    /// config directory is known.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(&self) -> Result<StoreConfig, ConfigError> {
        let Some(path) = self.path() else {
            return Ok(StoreConfig::default());
        };

        match fs::read(path).await {
            Ok(content) => Ok(from_yaml_bytes(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                Ok(StoreConfig::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Saves the configuration, creating the parent directory.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no config directory or the file cannot
    /// be written.
    pub async fn save(&self, config: &StoreConfig) -> Result<(), ConfigError> {
        let path = self.path().ok_or(ConfigError::NoConfigDir)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, to_yaml_bytes(config)?).await?;
        Ok(())
    }
}
