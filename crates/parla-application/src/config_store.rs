//! ConfigStore - owner of the process-wide `ClientConfig`.
//!
//! Reads are synchronous and always return the latest updated value. The
//! durable snapshot is only touched by explicit `load()` and `save()` calls.

use std::sync::{Arc, PoisonError, RwLock};

use parla_core::config::{ClientConfig, ConfigAdvisory, ConfigRepository, ConfigUpdate};
use parla_core::{ParlaError, Result};

/// What `ConfigStore::load` did with the persisted snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// A snapshot was found and merged over the defaults.
    Restored,
    /// Nothing was persisted; defaults are in effect.
    NoSnapshot,
    /// The snapshot could not be read or parsed; the current configuration
    /// was left untouched.
    KeptDefaults(ParlaError),
}

pub struct ConfigStore {
    config: RwLock<ClientConfig>,
    repository: Arc<dyn ConfigRepository>,
}

impl ConfigStore {
    /// Creates a store holding the default configuration.
    ///
    /// Call `load()` to overlay the persisted snapshot.
    pub fn new(repository: Arc<dyn ConfigRepository>) -> Self {
        Self {
            config: RwLock::new(ClientConfig::default()),
            repository,
        }
    }

    /// Restores the persisted snapshot, shallow-merged over the defaults.
    ///
    /// Never fails: a missing, unreadable or corrupt snapshot leaves the
    /// configuration as it was.
    pub fn load(&self) -> LoadOutcome {
        let snapshot = match self.repository.load_snapshot() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                tracing::debug!("[ConfigStore] No persisted configuration, using defaults");
                return LoadOutcome::NoSnapshot;
            }
            Err(e) => {
                tracing::warn!("[ConfigStore] Failed to read configuration: {}", e);
                return LoadOutcome::KeptDefaults(e);
            }
        };

        match ClientConfig::from_snapshot(&snapshot) {
            Ok(restored) => {
                for advisory in restored.advisories() {
                    tracing::warn!("[ConfigStore] Restored configuration: {}", advisory);
                }
                *self.config.write().unwrap_or_else(PoisonError::into_inner) = restored;
                tracing::info!("[ConfigStore] Configuration restored");
                LoadOutcome::Restored
            }
            Err(e) => {
                tracing::warn!(
                    "[ConfigStore] Ignoring corrupt configuration snapshot: {}",
                    e
                );
                LoadOutcome::KeptDefaults(e)
            }
        }
    }

    /// Writes the full configuration record, replacing any prior snapshot.
    pub fn save(&self) -> Result<()> {
        let snapshot = self.snapshot().to_snapshot().inspect_err(|e| {
            tracing::warn!("[ConfigStore] Refusing to save configuration: {}", e);
        })?;
        self.repository.save_snapshot(&snapshot).inspect_err(|e| {
            tracing::warn!("[ConfigStore] Failed to save configuration: {}", e);
        })?;
        tracing::debug!("[ConfigStore] Configuration saved");
        Ok(())
    }

    /// Replaces exactly one field.
    ///
    /// Out-of-range `maxSteps`/`temperature` values are stored as given.
    pub fn update(&self, update: ConfigUpdate) {
        let field = update.field_name();
        let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
        update.apply(&mut config);
        tracing::debug!("[ConfigStore] Updated {}", field);
        for advisory in config.advisories() {
            tracing::debug!("[ConfigStore] {}", advisory);
        }
    }

    /// Copy of the current configuration.
    pub fn snapshot(&self) -> ClientConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn advisories(&self) -> Vec<ConfigAdvisory> {
        self.snapshot().advisories()
    }
}
