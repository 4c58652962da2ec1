//! Configuration repository trait.

use serde_json::Value;

use crate::error::Result;

/// Fixed key the configuration snapshot is stored under.
pub const CONFIG_STORAGE_KEY: &str = "chatbotConfig";

/// Durable storage for the configuration snapshot.
///
/// Implementations store one JSON record and hand it back untouched; merging
/// over defaults and validation happen in the caller.
pub trait ConfigRepository: Send + Sync {
    /// Reads the stored snapshot.
    ///
    /// Returns `Ok(None)` when nothing has been saved yet, and an error when
    /// something was stored but cannot be read back as JSON.
    fn load_snapshot(&self) -> Result<Option<Value>>;

    /// Overwrites the stored snapshot.
    fn save_snapshot(&self, snapshot: &Value) -> Result<()>;
}
