//! User-visible transcript texts.
//!
//! Every string the engine writes into the transcript on its own behalf is
//! built here, so a presentation layer has one place to localize.

/// User entry appended when a connection test starts.
pub const CONNECTION_TEST_NOTICE: &str = "🔧 Testing connection to the server...";

/// Prompt sent to the chat endpoint by a connection test.
pub const CONNECTION_TEST_PROMPT: &str = "Connection test";

/// Question shown to the caller before clearing every user's memory.
pub const CLEAR_ALL_CONFIRMATION: &str =
    "Clear the conversation memory of ALL users? This cannot be undone.";

pub fn http_error(status: u16, status_text: &str) -> String {
    format!("HTTP error {}: {}", status, status_text)
}

pub fn chat_transport_failure(chat_endpoint: &str) -> String {
    format!(
        "Error communicating with the server. Make sure the server is running at {}",
        chat_endpoint
    )
}

pub fn connection_ok(status: u16, status_text: &str) -> String {
    format!("✅ Connection OK! Status: {} {}", status, status_text)
}

pub fn connection_failed(chat_endpoint: &str) -> String {
    format!(
        "❌ Connection failed! Check that the server is running at {}",
        chat_endpoint
    )
}

pub fn memory_clear_http_failure(status: u16, status_text: &str) -> String {
    format!("Memory clear failed: HTTP {} {}", status, status_text)
}

pub fn memory_clear_transport_failure(detail: &str) -> String {
    format!("Memory clear failed: {}", detail)
}
