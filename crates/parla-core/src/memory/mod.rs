//! Memory service records.
//!
//! The memory service tracks per-user conversation history on the agent side.
//! The client only reads its statistics and asks it to forget.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Path segment of the statistics endpoint, relative to the memory base URL.
pub const STATS_PATH: &str = "stats";
/// Path segment of the clear endpoint, relative to the memory base URL.
pub const CLEAR_PATH: &str = "clear";

/// Snapshot of the memory service, as returned by `GET {base}/stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStats {
    /// Maximum number of messages retained per user.
    pub memory_limit: u64,
    pub default_user_id: String,
    pub active_users: u64,
    /// Per-user statistics keyed by user id.
    #[serde(default)]
    pub users: BTreeMap<String, UserMemoryStats>,
}

/// Statistics of one user's retained history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMemoryStats {
    pub message_count: u64,
    /// Timestamp of the newest retained message, as sent by the server.
    #[serde(default)]
    pub last_message_time: Option<String>,
}

impl MemoryStats {
    /// One display line per user, ordered by user id.
    pub fn summary_lines(&self) -> Vec<String> {
        self.users
            .iter()
            .map(|(user_id, stats)| match &stats.last_message_time {
                Some(time) => format!(
                    "{}: {} messages (last at {})",
                    user_id, stats.message_count, time
                ),
                None => format!("{}: {} messages", user_id, stats.message_count),
            })
            .collect()
    }

    pub fn total_messages(&self) -> u64 {
        self.users.values().map(|u| u.message_count).sum()
    }
}

/// Body of `DELETE {base}/clear`.
///
/// Serializes to `{}` when no user is named, which the server interprets as
/// its default scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearMemoryRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl ClearMemoryRequest {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    pub fn unscoped() -> Self {
        Self::default()
    }
}

/// Reply of `DELETE {base}/clear`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearMemoryResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub cleared_user: Option<String>,
    #[serde(default)]
    pub users_cleared: u64,
}

fn default_success() -> bool {
    true
}
