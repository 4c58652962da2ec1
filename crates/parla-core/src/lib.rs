//! Domain layer for parla.
//!
//! Holds the types every other crate agrees on: the client configuration and
//! its persistence seam, the transcript model, the HTTP transport seam, and the
//! memory service records. Nothing in here performs I/O on its own.

pub mod config;
pub mod error;
pub mod memory;
pub mod messages;
pub mod quick_action;
pub mod session;
pub mod transport;

// Re-export common error type
pub use error::{ParlaError, Result};
