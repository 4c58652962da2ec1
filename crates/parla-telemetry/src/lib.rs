//! Logging setup for parla embedders.

pub mod diagnostic_layer;
pub mod setup;

pub use diagnostic_layer::{DiagnosticEvent, DiagnosticEventLayer};
pub use setup::{DEFAULT_FILTER, TelemetryError, init_tracing, init_tracing_with_diagnostics};
