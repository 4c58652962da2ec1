//! Per-session mutable state.

use crate::memory::MemoryStats;

use super::transcript::Transcript;

/// Everything the presentation layer observes about one chat session.
///
/// `loading` is the single busy flag shared by the chat and memory paths:
/// while it is set no other network operation may start.
#[derive(Debug, Default, Clone)]
pub struct ChatState {
    pub transcript: Transcript,
    pub loading: bool,
    /// Text currently typed in the input box.
    pub input: String,
    /// Last successfully fetched memory statistics.
    pub memory_stats: Option<MemoryStats>,
    pub memory_panel_open: bool,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the busy flag if it is clear. Returns whether it was acquired.
    pub fn try_acquire_loading(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        true
    }

    pub fn release_loading(&mut self) {
        self.loading = false;
    }
}
