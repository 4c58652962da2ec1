//! Append-only conversation transcript.

use chrono::Local;

use super::message::{Message, MessageId, Sender, TIMESTAMP_FORMAT};

/// Ordered sequence of transcript entries.
///
/// Entries can only be appended or all removed at once. Identifiers keep
/// increasing across `clear`, so an id is never reused within a session.
#[derive(Debug, Default, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
    next_id: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry and returns a copy of it.
    pub fn push(&mut self, sender: Sender, text: impl Into<String>, is_error: bool) -> Message {
        let message = Message {
            id: MessageId(self.next_id),
            text: text.into(),
            sender,
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            is_error,
        };
        self.next_id += 1;
        self.messages.push(message.clone());
        message
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> Message {
        self.push(Sender::User, text, false)
    }

    pub fn push_bot(&mut self, text: impl Into<String>, is_error: bool) -> Message {
        self.push(Sender::Bot, text, is_error)
    }

    /// Replaces the transcript with the empty sequence.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
