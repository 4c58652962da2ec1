//! Shared handle over one session's `ChatState`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use parla_core::memory::MemoryStats;
use parla_core::session::{ChatState, Message};

/// Cloneable handle to the state of one chat session.
///
/// The conversation engine and the memory controller hold clones of the same
/// handle. The lock is only taken for short synchronous sections and is never
/// held across an `.await`.
#[derive(Clone, Default)]
pub struct ChatSession {
    state: Arc<Mutex<ChatState>>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ChatState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` against a consistent view of the state.
    pub fn read<R>(&self, f: impl FnOnce(&ChatState) -> R) -> R {
        f(&self.lock())
    }

    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut ChatState) -> R) -> R {
        f(&mut self.lock())
    }

    /// Sets the loading flag if it is clear.
    ///
    /// Returns `None` when another operation is in flight. The flag is
    /// released when the returned guard is dropped, on every exit path.
    pub(crate) fn try_begin(&self) -> Option<LoadingGuard> {
        if self.update(ChatState::try_acquire_loading) {
            Some(LoadingGuard {
                session: self.clone(),
            })
        } else {
            None
        }
    }

    /// Copy of the transcript, oldest first.
    pub fn messages(&self) -> Vec<Message> {
        self.read(|state| state.transcript.messages().to_vec())
    }

    pub fn transcript_len(&self) -> usize {
        self.read(|state| state.transcript.len())
    }

    pub fn last_message(&self) -> Option<Message> {
        self.read(|state| state.transcript.last().cloned())
    }

    pub fn is_loading(&self) -> bool {
        self.read(|state| state.loading)
    }

    pub fn input(&self) -> String {
        self.read(|state| state.input.clone())
    }

    pub fn set_input(&self, text: impl Into<String>) {
        let text = text.into();
        self.update(|state| state.input = text);
    }

    pub fn memory_stats(&self) -> Option<MemoryStats> {
        self.read(|state| state.memory_stats.clone())
    }

    pub fn is_memory_panel_open(&self) -> bool {
        self.read(|state| state.memory_panel_open)
    }
}

/// Holds the session's loading flag until dropped.
pub(crate) struct LoadingGuard {
    session: ChatSession,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.session.update(ChatState::release_loading);
    }
}
