//! Application layer for parla.
//!
//! Use cases that drive one chat session: configuration, chat turns,
//! response resolution and memory service operations.

pub mod client;
pub mod config_store;
pub mod conversation;
pub mod memory_controller;
pub mod resolver;
pub mod state;

pub use client::ChatClient;
pub use config_store::{ConfigStore, LoadOutcome};
pub use conversation::{ConversationEngine, TurnOutcome};
pub use memory_controller::MemoryController;
pub use resolver::{ResolvedFrom, Resolution, ResponsePayload, ResponseResolver};
pub use state::ChatSession;
