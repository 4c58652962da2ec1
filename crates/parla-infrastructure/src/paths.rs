//! Path management for parla's local files.
//!
//! ```text
//! ~/.config/parla/             # Config directory (platform config dir + "parla")
//! └── chatbotConfig.json       # Persisted client configuration
//! ```

use std::path::PathBuf;

const APP_DIR_NAME: &str = "parla";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform configuration directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find configuration directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves where parla keeps its files on this platform.
pub struct ParlaPaths;

impl ParlaPaths {
    /// Returns the parla configuration directory (e.g. `~/.config/parla/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the file a snapshot stored under `key` lives in.
    pub fn snapshot_file(key: &str) -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join(format!("{}.json", key)))
    }
}
