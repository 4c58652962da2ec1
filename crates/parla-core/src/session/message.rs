//! Transcript entry types.

use serde::{Deserialize, Serialize};

/// Display format of `Message::timestamp`.
pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S";

/// Monotonic identifier of a transcript entry, unique within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// A single entry in the transcript.
///
/// Entries are created by the engine and never modified after they are
/// appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    /// Local wall-clock time, formatted with `TIMESTAMP_FORMAT`.
    pub timestamp: String,
    #[serde(default)]
    pub is_error: bool,
}

impl Message {
    pub fn is_from_user(&self) -> bool {
        self.sender == Sender::User
    }

    pub fn is_from_bot(&self) -> bool {
        self.sender == Sender::Bot
    }
}
