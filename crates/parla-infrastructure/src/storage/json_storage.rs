//! JSON file storage with atomic replacement.
//!
//! Holds a single `serde_json::Value` per file. Knows nothing about what the
//! value means; callers own merging and validation.

use serde_json::Value as JsonValue;
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

/// Errors that can occur during JSON storage operations.
#[derive(Debug)]
pub enum JsonStorageError {
    /// File I/O error.
    IoError(std::io::Error),
    /// The file exists but does not hold valid JSON.
    ParseError(serde_json::Error),
    /// JSON serialization error.
    SerError(serde_json::Error),
    /// File locking error.
    LockError(String),
}

impl std::fmt::Display for JsonStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            JsonStorageError::ParseError(e) => write!(f, "JSON parse error: {}", e),
            JsonStorageError::SerError(e) => write!(f, "JSON serialization error: {}", e),
            JsonStorageError::LockError(e) => write!(f, "Lock error: {}", e),
        }
    }
}

impl std::error::Error for JsonStorageError {}

impl From<std::io::Error> for JsonStorageError {
    fn from(e: std::io::Error) -> Self {
        JsonStorageError::IoError(e)
    }
}

/// A single JSON document on disk.
///
/// - **Atomicity**: writes go to a sibling tmp file that is renamed over the
///   target, so readers see either the old or the new document
/// - **Isolation**: writers take an exclusive lock file for the duration of
///   the write
/// - **Durability**: the tmp file is fsynced before the rename
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the document.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(JsonValue))`: Successfully loaded
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<JsonValue>, JsonStorageError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let value = serde_json::from_str(&content).map_err(JsonStorageError::ParseError)?;
        Ok(Some(value))
    }

    /// Replaces the document atomically.
    pub fn save(&self, data: &JsonValue) -> Result<(), JsonStorageError> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let _lock = FileLock::acquire(&self.path)?;

        let json_string = serde_json::to_string_pretty(data).map_err(JsonStorageError::SerError)?;

        let tmp_path = self.get_temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    fn get_temp_path(&self) -> Result<PathBuf, JsonStorageError> {
        let parent = self.path.parent().ok_or_else(|| {
            JsonStorageError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            ))
        })?;

        let file_name = self.path.file_name().ok_or_else(|| {
            JsonStorageError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no file name",
            ))
        })?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }
}

/// Exclusive lock on `<path>.lock`, released and removed on drop.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, JsonStorageError> {
        let lock_path = path.with_extension("lock");

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive().map_err(|e| {
                JsonStorageError::LockError(format!("Failed to acquire lock: {}", e))
            })?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlock is automatic when the file handle is dropped
        let _ = fs::remove_file(&self.lock_path);
    }
}
