//! Pre-canned prompts offered next to the input box.

use serde::{Deserialize, Serialize};

/// A labelled prompt that is submitted as if the user had typed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickPrompt {
    /// Button label.
    pub label: String,
    /// Text submitted to the agent.
    pub prompt: String,
}

impl QuickPrompt {
    pub fn new(label: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            prompt: prompt.into(),
        }
    }
}

/// The address-book prompts the client ships with.
pub fn default_quick_prompts() -> Vec<QuickPrompt> {
    vec![
        QuickPrompt::new(
            "📋 List address book",
            "Hi! List the records in the rubrica table",
        ),
        QuickPrompt::new("👥 All contacts", "Show me all the contacts"),
        QuickPrompt::new("➕ New contact", "Create a new contact"),
    ]
}
