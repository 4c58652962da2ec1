#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use parla_application::ChatClient;
use parla_core::transport::{HttpRequest, HttpResponse, HttpTransport};
use parla_core::{ParlaError, Result};
use parla_infrastructure::InMemoryConfigRepository;
use serde_json::Value;
use tokio::sync::Notify;

pub fn json_response(status: u16, status_text: &str, body: Value) -> Result<HttpResponse> {
    Ok(HttpResponse {
        status,
        status_text: status_text.to_string(),
        content_type: Some("application/json".to_string()),
        body: body.to_string(),
    })
}

pub fn ok_json(body: Value) -> Result<HttpResponse> {
    json_response(200, "OK", body)
}

pub fn text_response(status: u16, status_text: &str, body: &str) -> Result<HttpResponse> {
    Ok(HttpResponse {
        status,
        status_text: status_text.to_string(),
        content_type: Some("text/plain".to_string()),
        body: body.to_string(),
    })
}

pub fn refused() -> Result<HttpResponse> {
    Err(ParlaError::transport("connection refused"))
}

/// Replays queued outcomes in order and records every request.
#[derive(Default)]
pub struct MockTransport {
    outcomes: Mutex<VecDeque<Result<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_outcomes(outcomes: Vec<Result<HttpResponse>>) -> Arc<Self> {
        let transport = Self::default();
        *transport.outcomes.lock().unwrap() = outcomes.into();
        Arc::new(transport)
    }

    pub fn push(&self, outcome: Result<HttpResponse>) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ParlaError::transport("no queued response")))
    }
}

/// Holds each request until the test releases it.
pub struct GatedTransport {
    pub entered: Notify,
    pub release: Notify,
    outcome: Result<HttpResponse>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl GatedTransport {
    pub fn new(outcome: Result<HttpResponse>) -> Arc<Self> {
        Arc::new(Self {
            entered: Notify::new(),
            release: Notify::new(),
            outcome,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for GatedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        self.entered.notify_one();
        self.release.notified().await;
        self.outcome.clone()
    }
}

pub fn client_with(transport: Arc<dyn HttpTransport>) -> ChatClient {
    ChatClient::new(transport, Arc::new(InMemoryConfigRepository::new()))
}
