//! Tracing layer that forwards diagnostic events to an embedding UI.
//!
//! Failures the engine keeps out of the transcript (stats fetch errors, a
//! corrupt configuration snapshot) are only logged. This layer lets a
//! presentation layer receive them through a tokio channel and show them
//! somewhere else, e.g. a status bar.

use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// Event data sent to the UI
#[derive(Debug, Clone, serde::Serialize)]
pub struct DiagnosticEvent {
    /// Event target (e.g., "parla_application::memory_controller")
    pub target: String,
    /// Log level (ERROR, WARN, INFO, DEBUG, TRACE)
    pub level: String,
    /// Human-readable message
    pub message: String,
    /// Structured fields from the event
    pub fields: HashMap<String, Value>,
    /// RFC 3339 timestamp
    pub timestamp: String,
}

/// Sends every matching event to a channel.
pub struct DiagnosticEventLayer {
    sender: mpsc::UnboundedSender<DiagnosticEvent>,
    max_level: Level,
    target_prefix: Option<String>,
}

impl DiagnosticEventLayer {
    /// Forwards events at `WARN` and above from any target.
    pub fn new(sender: mpsc::UnboundedSender<DiagnosticEvent>) -> Self {
        Self {
            sender,
            max_level: Level::WARN,
            target_prefix: None,
        }
    }

    /// Forwards events up to and including `level` in verbosity.
    pub fn with_max_level(mut self, level: Level) -> Self {
        self.max_level = level;
        self
    }

    /// Only forwards events whose target starts with `prefix`.
    pub fn with_target_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.target_prefix = Some(prefix.into());
        self
    }

    fn accepts(&self, level: &Level, target: &str) -> bool {
        if *level > self.max_level {
            return false;
        }
        self.target_prefix
            .as_deref()
            .is_none_or(|prefix| target.starts_with(prefix))
    }
}

impl<S> Layer<S> for DiagnosticEventLayer
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !self.accepts(metadata.level(), metadata.target()) {
            return;
        }

        let mut fields = HashMap::new();
        event.record(&mut FieldVisitor(&mut fields));

        let diagnostic = DiagnosticEvent {
            target: metadata.target().to_string(),
            level: metadata.level().to_string(),
            message: fields
                .remove("message")
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default(),
            fields,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        // Receiver gone means nobody is listening any more.
        let _ = self.sender.send(diagnostic);
    }
}

/// Field visitor that extracts tracing event fields into a HashMap
struct FieldVisitor<'a>(&'a mut HashMap<String, Value>);

impl tracing::field::Visit for FieldVisitor<'_> {
    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.insert(
            field.name().to_string(),
            serde_json::json!(format!("{:?}", value)),
        );
    }
}
