//! ConversationEngine - chat turns over the shared session.
//!
//! Every network operation takes the session's loading flag first. An
//! operation that finds the flag set returns `TurnOutcome::NoOp` without
//! touching the transcript or the network, so at most one request is ever
//! in flight and transcript entries land in completion order.

use std::sync::Arc;

use parla_core::Result;
use parla_core::config::ClientConfig;
use parla_core::messages;
use parla_core::quick_action::{QuickPrompt, default_quick_prompts};
use parla_core::session::{ChatRequest, Message};
use parla_core::transport::{HttpRequest, HttpResponse, HttpTransport};

use crate::config_store::ConfigStore;
use crate::resolver::ResponseResolver;
use crate::state::ChatSession;

/// Result of a user intent that may touch the network.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Nothing happened: empty input, or another operation was in flight.
    NoOp,
    /// The operation ran; carries the terminal transcript entry it appended.
    Completed(Message),
}

impl TurnOutcome {
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::NoOp)
    }

    pub fn message(&self) -> Option<&Message> {
        match self {
            Self::NoOp => None,
            Self::Completed(message) => Some(message),
        }
    }
}

pub struct ConversationEngine {
    session: ChatSession,
    config: Arc<ConfigStore>,
    transport: Arc<dyn HttpTransport>,
    quick_prompts: Vec<QuickPrompt>,
}

impl ConversationEngine {
    pub fn new(
        session: ChatSession,
        config: Arc<ConfigStore>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            session,
            config,
            transport,
            quick_prompts: default_quick_prompts(),
        }
    }

    /// Replaces the quick prompt catalogue.
    pub fn with_quick_prompts(mut self, quick_prompts: Vec<QuickPrompt>) -> Self {
        self.quick_prompts = quick_prompts;
        self
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn quick_prompts(&self) -> &[QuickPrompt] {
        &self.quick_prompts
    }

    /// Sends one chat turn.
    ///
    /// No-op for blank text or while another operation is in flight.
    /// Otherwise appends the user entry, clears the input buffer, dispatches
    /// the request and appends exactly one bot entry, success or error.
    pub async fn submit(&self, text: &str) -> TurnOutcome {
        if text.trim().is_empty() {
            return TurnOutcome::NoOp;
        }

        let Some(_loading) = self.session.try_begin() else {
            tracing::debug!("[ConversationEngine] Busy, ignoring submission");
            return TurnOutcome::NoOp;
        };

        self.session.update(|state| {
            state.transcript.push_user(text);
            state.input.clear();
        });

        // Later config edits must not affect this request.
        let config = self.config.snapshot();
        tracing::info!(
            "[ConversationEngine] Sending prompt to {} ({}/{})",
            config.chat_endpoint,
            config.provider,
            config.model
        );

        let outcome = self.dispatch(text, &config).await;
        let resolution = ResponseResolver::from_config(&config).resolve(outcome);
        tracing::debug!(
            "[ConversationEngine] Reply resolved from {:?} (error: {})",
            resolution.source,
            resolution.is_error
        );

        let message = self
            .session
            .update(|state| state.transcript.push_bot(resolution.text, resolution.is_error));
        TurnOutcome::Completed(message)
    }

    /// Submits the current contents of the input buffer.
    pub async fn submit_input(&self) -> TurnOutcome {
        let text = self.session.input();
        self.submit(&text).await
    }

    /// Puts `text` in the input buffer and submits it in the same call.
    pub async fn quick_submit(&self, text: &str) -> TurnOutcome {
        self.session.set_input(text);
        self.submit(text).await
    }

    /// Submits the quick prompt at `index` of the catalogue.
    pub async fn quick_submit_preset(&self, index: usize) -> TurnOutcome {
        let Some(preset) = self.quick_prompts.get(index) else {
            tracing::debug!("[ConversationEngine] No quick prompt at index {}", index);
            return TurnOutcome::NoOp;
        };
        let prompt = preset.prompt.clone();
        self.quick_submit(&prompt).await
    }

    /// Sends the diagnostic prompt and reports the HTTP status.
    ///
    /// Any HTTP completion counts as a reachable server; the body is not
    /// read for display. Only a transport failure is reported as an error.
    pub async fn test_connection(&self) -> TurnOutcome {
        let Some(_loading) = self.session.try_begin() else {
            tracing::debug!("[ConversationEngine] Busy, ignoring connection test");
            return TurnOutcome::NoOp;
        };

        self.session.update(|state| {
            state.transcript.push_user(messages::CONNECTION_TEST_NOTICE);
        });

        let config = self.config.snapshot();
        let (text, is_error) = match self
            .dispatch(messages::CONNECTION_TEST_PROMPT, &config)
            .await
        {
            Ok(response) => {
                tracing::info!(
                    "[ConversationEngine] Connection test: {} {}",
                    response.status,
                    response.status_text
                );
                (
                    messages::connection_ok(response.status, &response.status_text),
                    false,
                )
            }
            Err(e) => {
                tracing::warn!("[ConversationEngine] Connection test failed: {}", e);
                (messages::connection_failed(&config.chat_endpoint), true)
            }
        };

        let message = self
            .session
            .update(|state| state.transcript.push_bot(text, is_error));
        TurnOutcome::Completed(message)
    }

    /// Empties the transcript. No network effect.
    pub fn clear_transcript(&self) {
        self.session.update(|state| state.transcript.clear());
        tracing::debug!("[ConversationEngine] Transcript cleared");
    }

    async fn dispatch(&self, prompt: &str, config: &ClientConfig) -> Result<HttpResponse> {
        let body = serde_json::to_value(ChatRequest::new(prompt, config))?;
        self.transport
            .send(HttpRequest::post_json(&config.chat_endpoint, body))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parla_core::ParlaError;
    use parla_core::session::Sender;
    use parla_infrastructure::InMemoryConfigRepository;
    use std::sync::Mutex;

    /// Answers every request with the same outcome and counts calls.
    struct FixedTransport {
        outcome: Result<HttpResponse>,
        calls: Mutex<Vec<HttpRequest>>,
    }

    impl FixedTransport {
        fn new(outcome: Result<HttpResponse>) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<HttpRequest> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpTransport for FixedTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
            self.calls.lock().unwrap().push(request);
            self.outcome.clone()
        }
    }

    fn engine(transport: Arc<FixedTransport>) -> ConversationEngine {
        let config = Arc::new(ConfigStore::new(Arc::new(InMemoryConfigRepository::new())));
        ConversationEngine::new(ChatSession::new(), config, transport)
    }

    fn text_reply(body: &str) -> Result<HttpResponse> {
        Ok(HttpResponse {
            status: 200,
            status_text: "OK".to_string(),
            content_type: Some("text/plain".to_string()),
            body: body.to_string(),
        })
    }

    #[tokio::test]
    async fn test_blank_input_is_noop() {
        let transport = FixedTransport::new(text_reply("unused"));
        let engine = engine(transport.clone());

        for blank in ["", "   ", "\n\t "] {
            assert!(engine.submit(blank).await.is_noop());
        }

        assert_eq!(engine.session().transcript_len(), 0);
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_submit_appends_user_then_bot_and_releases_flag() {
        let transport = FixedTransport::new(text_reply("pong"));
        let engine = engine(transport.clone());
        engine.session().set_input("ping");

        let outcome = engine.submit_input().await;

        let messages = engine.session().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[0].text, "ping");
        assert_eq!(messages[1].sender, Sender::Bot);
        assert_eq!(messages[1].text, "pong");
        assert_eq!(outcome.message(), Some(&messages[1]));
        assert!(engine.session().input().is_empty());
        assert!(!engine.session().is_loading());
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_while_loading_is_noop() {
        let transport = FixedTransport::new(text_reply("pong"));
        let engine = engine(transport.clone());

        let _held = engine.session().try_begin().unwrap();
        assert!(engine.submit("hello").await.is_noop());
        assert!(engine.test_connection().await.is_noop());

        assert_eq!(engine.session().transcript_len(), 0);
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_appends_error_and_releases_flag() {
        let transport = FixedTransport::new(Err(ParlaError::transport("connection refused")));
        let engine = engine(transport);

        let outcome = engine.submit("hello").await;

        let message = outcome.message().unwrap();
        assert!(message.is_error);
        assert!(message.text.contains("http://localhost:8000/api/v1/query"));
        assert!(!engine.session().is_loading());
    }

    #[tokio::test]
    async fn test_connection_reports_status_even_on_http_error() {
        let transport = FixedTransport::new(Ok(HttpResponse {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            content_type: None,
            body: String::new(),
        }));
        let engine = engine(transport.clone());

        let outcome = engine.test_connection().await;

        let messages = engine.session().messages();
        assert_eq!(messages[0].text, messages::CONNECTION_TEST_NOTICE);
        assert_eq!(messages[0].sender, Sender::User);
        let reply = outcome.message().unwrap();
        assert_eq!(reply.text, "✅ Connection OK! Status: 500 Internal Server Error");
        assert!(!reply.is_error);

        let body = transport.calls()[0].body.clone().unwrap();
        assert_eq!(body["prompt"], messages::CONNECTION_TEST_PROMPT);
    }

    #[tokio::test]
    async fn test_connection_transport_failure_is_error() {
        let engine = engine(FixedTransport::new(Err(ParlaError::transport("refused"))));

        let reply = engine.test_connection().await;

        let reply = reply.message().unwrap();
        assert!(reply.is_error);
        assert_eq!(
            reply.text,
            "❌ Connection failed! Check that the server is running at http://localhost:8000/api/v1/query"
        );
    }

    #[tokio::test]
    async fn test_quick_submit_preset() {
        let transport = FixedTransport::new(text_reply("ok"));
        let engine = engine(transport.clone());

        assert!(engine.quick_submit_preset(99).await.is_noop());

        engine.quick_submit_preset(1).await;
        let messages = engine.session().messages();
        assert_eq!(messages[0].text, engine.quick_prompts()[1].prompt);
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_clear_transcript_twice() {
        let engine = engine(FixedTransport::new(text_reply("ok")));
        engine.submit("hello").await;

        engine.clear_transcript();
        assert_eq!(engine.session().transcript_len(), 0);
        engine.clear_transcript();
        assert_eq!(engine.session().transcript_len(), 0);
    }
}
