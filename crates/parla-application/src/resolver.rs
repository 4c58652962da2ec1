//! ResponseResolver - turns a chat endpoint reply into one display string.
//!
//! The agent's payload shape is not fixed. JSON replies are searched for a
//! displayable field (the configured one first, then `FALLBACK_FIELDS` in
//! order) and fall back to the whole record serialized as text. Any other
//! content type is shown verbatim.

use parla_core::Result;
use parla_core::config::ClientConfig;
use parla_core::messages;
use parla_core::transport::HttpResponse;
use serde_json::Value;

/// Field names tried, in priority order, when the configured field is absent.
pub const FALLBACK_FIELDS: [&str; 5] = ["output", "response", "message", "result", "data"];

/// Body of a successful chat reply.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponsePayload {
    Json(Value),
    Text(String),
}

impl ResponsePayload {
    /// Classifies `response` by its declared content type.
    ///
    /// A body declared as JSON that does not parse is a transport error.
    pub fn from_response(response: &HttpResponse) -> Result<Self> {
        if response.is_json() {
            Ok(Self::Json(response.json()?))
        } else {
            Ok(Self::Text(response.body.clone()))
        }
    }
}

/// Where the display text of a `Resolution` came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedFrom {
    /// The user-configured `responseField`.
    ConfiguredField(String),
    /// One of `FALLBACK_FIELDS`.
    FallbackField(&'static str),
    /// No recognized field; the whole JSON value serialized.
    Serialized,
    /// A non-JSON body, or a JSON string, shown as is.
    Text,
    /// Non-2xx status.
    HttpStatus(u16),
    /// No usable response was obtained.
    TransportFailure,
}

/// Display text for one chat reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub text: String,
    pub is_error: bool,
    pub source: ResolvedFrom,
}

impl Resolution {
    fn ok(text: String, source: ResolvedFrom) -> Self {
        Self {
            text,
            is_error: false,
            source,
        }
    }

    fn error(text: String, source: ResolvedFrom) -> Self {
        Self {
            text,
            is_error: true,
            source,
        }
    }
}

/// Resolver bound to the configuration snapshot of one request.
#[derive(Debug, Clone)]
pub struct ResponseResolver {
    response_field: String,
    chat_endpoint: String,
}

impl ResponseResolver {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            response_field: config.response_field.clone(),
            chat_endpoint: config.chat_endpoint.clone(),
        }
    }

    /// Resolves the outcome of one chat dispatch. Never fails.
    pub fn resolve(&self, outcome: Result<HttpResponse>) -> Resolution {
        let response = match outcome {
            Ok(response) => response,
            Err(e) => return self.transport_failure(&e.to_string()),
        };

        if !response.is_success() {
            tracing::warn!(
                "[ResponseResolver] Chat endpoint answered {} {}",
                response.status,
                response.status_text
            );
            return Resolution::error(
                messages::http_error(response.status, &response.status_text),
                ResolvedFrom::HttpStatus(response.status),
            );
        }

        match ResponsePayload::from_response(&response) {
            Ok(payload) => self.resolve_payload(payload),
            Err(e) => self.transport_failure(&e.to_string()),
        }
    }

    /// Picks the display text of a successful payload.
    pub fn resolve_payload(&self, payload: ResponsePayload) -> Resolution {
        let value = match payload {
            ResponsePayload::Text(text) => return Resolution::ok(text, ResolvedFrom::Text),
            ResponsePayload::Json(Value::String(text)) => {
                return Resolution::ok(text, ResolvedFrom::Text);
            }
            ResponsePayload::Json(value) => value,
        };

        if let Value::Object(record) = &value {
            if !self.response_field.is_empty() {
                let configured = record
                    .get(&self.response_field)
                    .filter(|v| is_displayable(v));
                if let Some(field) = configured {
                    return Resolution::ok(
                        display_text(field),
                        ResolvedFrom::ConfiguredField(self.response_field.clone()),
                    );
                }
            }

            for name in FALLBACK_FIELDS {
                if let Some(field) = record.get(name).filter(|v| is_displayable(v)) {
                    return Resolution::ok(display_text(field), ResolvedFrom::FallbackField(name));
                }
            }
        }

        tracing::debug!("[ResponseResolver] No recognized field in reply, showing raw JSON");
        Resolution::ok(value.to_string(), ResolvedFrom::Serialized)
    }

    fn transport_failure(&self, detail: &str) -> Resolution {
        tracing::warn!(
            "[ResponseResolver] Chat request to {} failed: {}",
            self.chat_endpoint,
            detail
        );
        Resolution::error(
            messages::chat_transport_failure(&self.chat_endpoint),
            ResolvedFrom::TransportFailure,
        )
    }
}

/// A field only counts when it holds something worth showing: null, `false`,
/// zero and the empty string are skipped.
fn is_displayable(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
