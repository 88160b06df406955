//! Config file storage.
//!
//! Reads `config.toml` into the `RasoiConfig` domain model.

use rasoi_core::config::RasoiConfig;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during config storage operations.
#[derive(Debug, Error)]
pub enum ConfigStorageError {
    /// File I/O error.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// TOML parsing error.
    #[error("TOML parse error in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Read-only storage for `config.toml`.
///
/// Responsibilities:
/// - Load and parse the TOML file
/// - Treat a missing or blank file as "no configuration"
///
/// Does NOT:
/// - Apply environment or command-line overrides (see `ConfigService`)
/// - Write the file
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(RasoiConfig))`: file parsed
    /// - `Ok(None)`: file doesn't exist or is blank
    /// - `Err`: file unreadable or not valid TOML for `RasoiConfig`
    pub fn load(&self) -> Result<Option<RasoiConfig>, ConfigStorageError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|source| ConfigStorageError::Io {
            path: self.path.clone(),
            source,
        })?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let config = toml::from_str(&content).map_err(|source| ConfigStorageError::Parse {
            path: self.path.clone(),
            source,
        })?;

        Ok(Some(config))
    }
}
