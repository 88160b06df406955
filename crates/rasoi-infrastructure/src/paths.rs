//! Path management for rasoi configuration files.
//!
//! ```text
//! ~/.config/rasoi/         # Config directory (platform config dir)
//! └── config.toml          # API locations, UI language, catalog overrides
//! ```

use std::path::PathBuf;
use thiserror::Error;

const APP_DIR: &str = "rasoi";
const CONFIG_FILE: &str = "config.toml";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Platform config directory could not be determined.
    #[error("Cannot find the configuration directory")]
    ConfigDirNotFound,
}

pub struct RasoiPaths;

impl RasoiPaths {
    /// Returns the rasoi configuration directory (e.g. `~/.config/rasoi/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path of `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }
}
