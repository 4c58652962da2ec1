//! Conversation domain module.
//!
//! # Module Structure
//!
//! - `message`: transcript entries (`Message`, `MessageId`, `Sender`)
//! - `transcript`: the append-only ordered sequence of entries (`Transcript`)
//! - `state`: per-session mutable state (`ChatState`)
//! - `request`: the chat request body (`ChatRequest`)

mod message;
mod request;
mod state;
mod transcript;

// Re-export public API
pub use message::{Message, MessageId, Sender, TIMESTAMP_FORMAT};
pub use request::ChatRequest;
pub use state::ChatState;
pub use transcript::Transcript;
