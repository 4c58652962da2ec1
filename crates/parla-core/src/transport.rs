//! HTTP dispatch seam.
//!
//! The engine never talks to the network directly. It hands an `HttpRequest`
//! to an `HttpTransport` and gets back a fully read `HttpResponse`, or a
//! `ParlaError::Transport` when no response could be obtained.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ParlaError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Delete => write!(f, "DELETE"),
        }
    }
}

/// An outbound request. A present `body` is sent as JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<Value>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            body: None,
        }
    }

    pub fn post_json(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            body: Some(body),
        }
    }

    pub fn delete_json(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Delete,
            url: url.into(),
            body: Some(body),
        }
    }
}

/// A completed response with its body read to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Reason phrase for `status` (e.g. "Not Found"); may be empty.
    pub status_text: String,
    /// Raw `Content-Type` header, if the server sent one.
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the declared content type is a JSON media type
    /// (`application/json` or any `+json` suffix type).
    pub fn is_json(&self) -> bool {
        let Some(content_type) = &self.content_type else {
            return false;
        };
        let media_type = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        media_type == "application/json" || media_type.ends_with("+json")
    }

    /// Parses the body as JSON. A malformed body is a transport failure.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body)
            .map_err(|e| ParlaError::transport(format!("Malformed JSON body: {}", e)))
    }

    /// Converts a non-2xx response into an `HttpStatus` error.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ParlaError::http_status(self.status, self.status_text))
        }
    }
}

/// Sends requests to remote endpoints.
///
/// There is no retry and no timeout layer beyond what the implementation's
/// client applies by default.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends `request` and reads the whole response body.
    ///
    /// Non-2xx statuses are returned as `Ok`; only failures that prevent a
    /// response from being read are `Err(ParlaError::Transport)`.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Joins a base URL and a path segment with exactly one slash.
pub fn join_url(base: &str, segment: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        segment.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, content_type: Option<&str>, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            status_text: String::new(),
            content_type: content_type.map(str::to_string),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_is_success_range() {
        assert!(response(200, None, "").is_success());
        assert!(response(204, None, "").is_success());
        assert!(!response(199, None, "").is_success());
        assert!(!response(302, None, "").is_success());
        assert!(!response(500, None, "").is_success());
    }

    #[test]
    fn test_is_json_media_types() {
        assert!(response(200, Some("application/json"), "").is_json());
        assert!(response(200, Some("Application/JSON; charset=utf-8"), "").is_json());
        assert!(response(200, Some("application/problem+json"), "").is_json());
        assert!(!response(200, Some("text/plain"), "").is_json());
        assert!(!response(200, None, "").is_json());
    }

    #[test]
    fn test_json_parse_failure_is_transport_error() {
        let err = response(200, Some("application/json"), "{oops")
            .json::<Value>()
            .unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_error_for_status() {
        let err = HttpResponse {
            status: 404,
            status_text: "Not Found".to_string(),
            content_type: None,
            body: String::new(),
        }
        .error_for_status()
        .unwrap_err();
        assert_eq!(err, ParlaError::http_status(404, "Not Found"));
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://localhost:8000/api/v1/memory", "stats"),
            "http://localhost:8000/api/v1/memory/stats"
        );
        assert_eq!(
            join_url("http://localhost:8000/api/v1/memory/", "/clear"),
            "http://localhost:8000/api/v1/memory/clear"
        );
    }
}
