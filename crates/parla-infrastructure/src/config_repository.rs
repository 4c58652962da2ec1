//! Configuration snapshot repositories.

use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use parla_core::config::{CONFIG_STORAGE_KEY, ConfigRepository};
use parla_core::{ParlaError, Result};
use serde_json::Value;

use crate::paths::ParlaPaths;
use crate::storage::{JsonFileStorage, JsonStorageError};

impl From<JsonStorageError> for ParlaError {
    fn from(err: JsonStorageError) -> Self {
        match err {
            JsonStorageError::IoError(e) => e.into(),
            JsonStorageError::ParseError(e) => ParlaError::config_parse(e.to_string()),
            JsonStorageError::SerError(e) => e.into(),
            JsonStorageError::LockError(message) => ParlaError::io(message),
        }
    }
}

/// Stores the configuration snapshot as a JSON file named after its key.
pub struct FileConfigRepository {
    storage: JsonFileStorage,
}

impl FileConfigRepository {
    /// Uses `<config_dir>/parla/chatbotConfig.json`.
    pub fn new_default() -> Result<Self> {
        let path = ParlaPaths::snapshot_file(CONFIG_STORAGE_KEY)
            .map_err(|e| ParlaError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Stores the snapshot at an explicit path (useful for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            storage: JsonFileStorage::new(path),
        }
    }

    /// Stores the snapshot under `key` inside `dir`.
    pub fn in_dir(dir: PathBuf, key: &str) -> Self {
        Self::with_path(dir.join(format!("{}.json", key)))
    }
}

impl ConfigRepository for FileConfigRepository {
    fn load_snapshot(&self) -> Result<Option<Value>> {
        let snapshot = self.storage.load()?;
        tracing::debug!(
            "[FileConfigRepository] Loaded snapshot from {} (present: {})",
            self.storage.path().display(),
            snapshot.is_some()
        );
        Ok(snapshot)
    }

    fn save_snapshot(&self, snapshot: &Value) -> Result<()> {
        self.storage.save(snapshot)?;
        tracing::debug!(
            "[FileConfigRepository] Saved snapshot to {}",
            self.storage.path().display()
        );
        Ok(())
    }
}

/// Keeps the snapshot in process memory.
///
/// For embedders without durable storage, and for tests.
#[derive(Default)]
pub struct InMemoryConfigRepository {
    slot: Mutex<Option<Value>>,
}

impl InMemoryConfigRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `snapshot` already stored.
    pub fn with_snapshot(snapshot: Value) -> Self {
        Self {
            slot: Mutex::new(Some(snapshot)),
        }
    }

    pub fn stored(&self) -> Option<Value> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ConfigRepository for InMemoryConfigRepository {
    fn load_snapshot(&self) -> Result<Option<Value>> {
        Ok(self.stored())
    }

    fn save_snapshot(&self, snapshot: &Value) -> Result<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(snapshot.clone());
        Ok(())
    }
}
