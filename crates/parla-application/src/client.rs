//! ChatClient - one session's components wired over shared handles.

use std::sync::Arc;

use parla_core::config::ConfigRepository;
use parla_core::transport::HttpTransport;
use parla_infrastructure::FileConfigRepository;
use parla_interaction::ReqwestTransport;

use crate::config_store::{ConfigStore, LoadOutcome};
use crate::conversation::ConversationEngine;
use crate::memory_controller::MemoryController;
use crate::state::ChatSession;

/// Entry point for a presentation layer.
///
/// The engine and the memory controller share one `ChatSession` and one
/// `ConfigStore`, so they observe the same transcript, loading flag and
/// configuration.
pub struct ChatClient {
    session: ChatSession,
    config: Arc<ConfigStore>,
    conversation: ConversationEngine,
    memory: MemoryController,
}

impl ChatClient {
    /// Builds a client and restores the persisted configuration.
    pub fn new(transport: Arc<dyn HttpTransport>, repository: Arc<dyn ConfigRepository>) -> Self {
        let session = ChatSession::new();
        let config = Arc::new(ConfigStore::new(repository));

        if let LoadOutcome::KeptDefaults(e) = config.load() {
            tracing::warn!("[ChatClient] Starting with default configuration: {}", e);
        }

        Self {
            conversation: ConversationEngine::new(
                session.clone(),
                config.clone(),
                transport.clone(),
            ),
            memory: MemoryController::new(session.clone(), config.clone(), transport),
            session,
            config,
        }
    }

    /// Uses `reqwest` for HTTP and the platform config directory for storage.
    pub fn with_defaults() -> anyhow::Result<Self> {
        let repository = FileConfigRepository::new_default()?;
        Ok(Self::new(
            Arc::new(ReqwestTransport::new()),
            Arc::new(repository),
        ))
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    pub fn conversation(&self) -> &ConversationEngine {
        &self.conversation
    }

    pub fn memory(&self) -> &MemoryController {
        &self.memory
    }
}
