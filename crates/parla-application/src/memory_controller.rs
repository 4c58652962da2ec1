//! MemoryController - statistics and clearing against the memory service.
//!
//! Shares the session (and so the loading flag and transcript) with the
//! conversation engine, and reads endpoints from the same `ConfigStore`.

use std::sync::Arc;

use parla_core::memory::{
    CLEAR_PATH, ClearMemoryRequest, ClearMemoryResponse, MemoryStats, STATS_PATH,
};
use parla_core::transport::{HttpRequest, HttpTransport, join_url};
use parla_core::{ParlaError, Result, messages};

use crate::config_store::ConfigStore;
use crate::conversation::TurnOutcome;
use crate::state::ChatSession;

pub struct MemoryController {
    session: ChatSession,
    config: Arc<ConfigStore>,
    transport: Arc<dyn HttpTransport>,
}

impl MemoryController {
    pub fn new(
        session: ChatSession,
        config: Arc<ConfigStore>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            session,
            config,
            transport,
        }
    }

    /// Fetches `GET {memoryEndpoint}/stats` and caches the result.
    ///
    /// Failures are logged only; cached stats and the transcript are left
    /// untouched. Returns `None` on failure or while another operation is
    /// in flight.
    pub async fn fetch_stats(&self) -> Option<MemoryStats> {
        let Some(loading) = self.session.try_begin() else {
            tracing::debug!("[MemoryController] Busy, skipping stats fetch");
            return None;
        };

        let base = self.config.snapshot().memory_endpoint;
        let result = self.request_stats(&base).await;
        drop(loading);

        match result {
            Ok(stats) => {
                tracing::info!(
                    "[MemoryController] Stats: {} active users, limit {}",
                    stats.active_users,
                    stats.memory_limit
                );
                let cached = stats.clone();
                self.session.update(|state| state.memory_stats = Some(cached));
                Some(stats)
            }
            Err(e) => {
                tracing::warn!("[MemoryController] Failed to fetch memory stats: {}", e);
                None
            }
        }
    }

    /// Clears one user's memory, or the server's default scope when
    /// `user_id` is `None`.
    pub async fn clear_user(&self, user_id: Option<&str>) -> TurnOutcome {
        let request = match user_id {
            Some(user_id) => ClearMemoryRequest::for_user(user_id),
            None => ClearMemoryRequest::unscoped(),
        };
        self.clear(request).await
    }

    /// Clears every user's memory after `confirm` approves.
    ///
    /// `confirm` receives the question to put to the user. A `false` answer
    /// makes this a no-op.
    pub async fn clear_all(&self, confirm: impl FnOnce(&str) -> bool) -> TurnOutcome {
        if !confirm(messages::CLEAR_ALL_CONFIRMATION) {
            tracing::info!("[MemoryController] Clear all declined");
            return TurnOutcome::NoOp;
        }
        self.clear(ClearMemoryRequest::unscoped()).await
    }

    /// Shows the memory panel and loads fresh stats into it.
    pub async fn open_panel(&self) -> Option<MemoryStats> {
        self.session.update(|state| state.memory_panel_open = true);
        self.fetch_stats().await
    }

    /// Hides the memory panel and drops the cached stats.
    pub fn close_panel(&self) {
        self.session.update(|state| {
            state.memory_panel_open = false;
            state.memory_stats = None;
        });
    }

    pub fn is_panel_open(&self) -> bool {
        self.session.is_memory_panel_open()
    }

    async fn clear(&self, request: ClearMemoryRequest) -> TurnOutcome {
        let Some(loading) = self.session.try_begin() else {
            tracing::debug!("[MemoryController] Busy, ignoring clear");
            return TurnOutcome::NoOp;
        };

        let base = self.config.snapshot().memory_endpoint;
        let (text, is_error) = match self.request_clear(&base, &request).await {
            Ok(reply) => {
                tracing::info!(
                    "[MemoryController] Cleared memory (user: {:?}, users cleared: {})",
                    reply.cleared_user,
                    reply.users_cleared
                );
                (reply.message, !reply.success)
            }
            Err(e) => {
                tracing::warn!("[MemoryController] Memory clear failed: {}", e);
                (clear_failure_text(&e), true)
            }
        };

        let message = self
            .session
            .update(|state| state.transcript.push_bot(text, is_error));
        drop(loading);

        if self.session.is_memory_panel_open() {
            self.fetch_stats().await;
        }

        TurnOutcome::Completed(message)
    }

    async fn request_stats(&self, base: &str) -> Result<MemoryStats> {
        self.transport
            .send(HttpRequest::get(join_url(base, STATS_PATH)))
            .await?
            .error_for_status()?
            .json()
    }

    async fn request_clear(
        &self,
        base: &str,
        request: &ClearMemoryRequest,
    ) -> Result<ClearMemoryResponse> {
        let body = serde_json::to_value(request)?;
        self.transport
            .send(HttpRequest::delete_json(join_url(base, CLEAR_PATH), body))
            .await?
            .error_for_status()?
            .json()
    }
}

fn clear_failure_text(error: &ParlaError) -> String {
    match error {
        ParlaError::HttpStatus {
            status,
            status_text,
        } => messages::memory_clear_http_failure(*status, status_text),
        other => messages::memory_clear_transport_failure(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_failure_text() {
        assert_eq!(
            clear_failure_text(&ParlaError::http_status(404, "Not Found")),
            "Memory clear failed: HTTP 404 Not Found"
        );
        assert_eq!(
            clear_failure_text(&ParlaError::transport("connection refused")),
            "Memory clear failed: Transport error: connection refused"
        );
    }
}
