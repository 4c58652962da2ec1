//! Chat request body.

use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;

/// Body POSTed to the chat endpoint for one turn.
///
/// Built from a configuration snapshot taken at dispatch time, so later edits
/// to the configuration do not affect a request already in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
    pub user_id: String,
    pub provider: String,
    pub model: String,
    pub max_steps: i64,
    pub temperature: f64,
}

impl ChatRequest {
    pub fn new(prompt: impl Into<String>, config: &ClientConfig) -> Self {
        Self {
            prompt: prompt.into(),
            user_id: config.user_id.clone(),
            provider: config.provider.clone(),
            model: config.model.clone(),
            max_steps: config.max_steps,
            temperature: config.temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_body_uses_snake_case_wire_names() {
        let config = ClientConfig::default();
        let body = serde_json::to_value(ChatRequest::new("ciao", &config)).unwrap();
        assert_eq!(
            body,
            json!({
                "prompt": "ciao",
                "user_id": "default",
                "provider": "gemini",
                "model": "gemini-2.5-flash",
                "max_steps": 15,
                "temperature": 0.1
            })
        );
    }
}
