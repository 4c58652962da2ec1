//! ReqwestTransport - `HttpTransport` backed by a shared `reqwest::Client`.
//!
//! Used for both the chat endpoint and the memory endpoint. The client is
//! built without a request timeout; a request runs until the server answers
//! or the connection fails.

use async_trait::async_trait;
use parla_core::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use parla_core::{ParlaError, Result};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;

/// HTTP transport that talks to the agent and memory services.
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Uses a preconfigured client (proxy, TLS, default headers).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let HttpRequest { method, url, body } = request;

        let mut builder = match method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        if let Some(body) = &body {
            builder = builder.json(body);
        }

        tracing::debug!("[ReqwestTransport] {} {}", method, url);

        let response = builder.send().await.map_err(|e| {
            tracing::warn!("[ReqwestTransport] {} {} failed: {}", method, url, e);
            ParlaError::transport(format!("{} {} failed: {}", method, url, e))
        })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let body = response.text().await.map_err(|e| {
            ParlaError::transport(format!("Failed to read response body from {}: {}", url, e))
        })?;

        tracing::debug!(
            "[ReqwestTransport] {} {} -> {} ({} bytes)",
            method,
            url,
            status.as_u16(),
            body.len()
        );

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            content_type,
            body,
        })
    }
}
