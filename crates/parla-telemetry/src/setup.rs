//! Global tracing subscriber initialization.
//!
//! # Usage
//!
//! ```no_run
//! // Console logging only
//! parla_telemetry::init_tracing(parla_telemetry::DEFAULT_FILTER).unwrap();
//! ```
//!
//! ```no_run
//! // Console logging plus diagnostics for the UI
//! let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
//! let layer = parla_telemetry::DiagnosticEventLayer::new(tx);
//! parla_telemetry::init_tracing_with_diagnostics(parla_telemetry::DEFAULT_FILTER, layer).unwrap();
//! ```

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::diagnostic_layer::DiagnosticEventLayer;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "parla=info";

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Invalid log filter '{filter}': {message}")]
    InvalidFilter { filter: String, message: String },

    #[error("Tracing already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Installs the global subscriber: `EnvFilter` plus a `fmt` layer.
///
/// `RUST_LOG` wins over `default_filter` when set.
///
/// # Errors
///
/// Returns an error if the filter does not parse or a global subscriber has
/// already been set.
pub fn init_tracing(default_filter: &str) -> Result<(), TelemetryError> {
    tracing_subscriber::registry()
        .with(env_filter(default_filter)?)
        .with(fmt_layer())
        .try_init()
        .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))
}

/// Like `init_tracing`, and also forwards events to `diagnostics`.
pub fn init_tracing_with_diagnostics(
    default_filter: &str,
    diagnostics: DiagnosticEventLayer,
) -> Result<(), TelemetryError> {
    tracing_subscriber::registry()
        .with(env_filter(default_filter)?)
        .with(fmt_layer())
        .with(diagnostics)
        .try_init()
        .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))
}

fn fmt_layer<S>() -> tracing_subscriber::fmt::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer().with_target(true)
}

fn env_filter(default_filter: &str) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(default_filter).map_err(|e| TelemetryError::InvalidFilter {
        filter: default_filter.to_string(),
        message: e.to_string(),
    })
}
