//! Client configuration record.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ParlaError, Result};

pub const DEFAULT_CHAT_ENDPOINT: &str = "http://localhost:8000/api/v1/query";
pub const DEFAULT_MEMORY_ENDPOINT: &str = "http://localhost:8000/api/v1/memory";
pub const DEFAULT_RESPONSE_FIELD: &str = "response";
pub const DEFAULT_PROVIDER: &str = "gemini";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_MAX_STEPS: i64 = 15;
pub const DEFAULT_TEMPERATURE: f64 = 0.1;
pub const DEFAULT_USER_ID: &str = "default";

/// Range the UI offers for `maxSteps`. Advisory only.
pub const MAX_STEPS_RANGE: RangeInclusive<i64> = 1..=100;
/// Range the UI offers for `temperature`. Advisory only.
pub const TEMPERATURE_RANGE: RangeInclusive<f64> = 0.0..=2.0;

/// Snapshot keys written by earlier client builds, mapped to their current name.
const LEGACY_KEYS: [(&str, &str); 1] = [("serverUrl", "chatEndpoint")];

/// Connection and generation settings shared by the chat and memory paths.
///
/// Serialized with camelCase keys; this is the exact shape of the persisted
/// snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// Full URL the chat turn is POSTed to.
    pub chat_endpoint: String,
    /// Base URL of the memory service (`/stats`, `/clear` are appended).
    pub memory_endpoint: String,
    /// Preferred field to display from a JSON chat response. Empty disables it.
    pub response_field: String,
    pub provider: String,
    pub model: String,
    pub max_steps: i64,
    pub temperature: f64,
    pub user_id: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            chat_endpoint: DEFAULT_CHAT_ENDPOINT.to_string(),
            memory_endpoint: DEFAULT_MEMORY_ENDPOINT.to_string(),
            response_field: DEFAULT_RESPONSE_FIELD.to_string(),
            provider: DEFAULT_PROVIDER.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_steps: DEFAULT_MAX_STEPS,
            temperature: DEFAULT_TEMPERATURE,
            user_id: DEFAULT_USER_ID.to_string(),
        }
    }
}

impl ClientConfig {
    /// Shallow-merges a persisted snapshot over the defaults.
    ///
    /// Keys present in `snapshot` replace the default value of that field,
    /// missing or `null` keys keep the default and unknown keys are ignored.
    /// A snapshot that is not a JSON object, or whose values have the wrong
    /// type, is a `ConfigParse` error.
    pub fn from_snapshot(snapshot: &Value) -> Result<Self> {
        let Value::Object(overrides) = snapshot else {
            return Err(ParlaError::config_parse(format!(
                "expected a JSON object, found {}",
                json_kind(snapshot)
            )));
        };

        let Value::Object(mut merged) = serde_json::to_value(Self::default())? else {
            return Err(ParlaError::internal("default configuration is not an object"));
        };

        // Earlier client builds stored NaN numbers as null.
        for (key, value) in overrides.iter().filter(|(_, v)| !v.is_null()) {
            merged.insert(key.clone(), value.clone());
        }

        for (legacy, current) in LEGACY_KEYS {
            if overrides.get(current).is_none_or(Value::is_null) {
                if let Some(value) = overrides.get(legacy).filter(|v| !v.is_null()) {
                    merged.insert(current.to_string(), value.clone());
                }
            }
            merged.remove(legacy);
        }

        serde_json::from_value(Value::Object(merged))
            .map_err(|e| ParlaError::config_parse(e.to_string()))
    }

    /// Serializes the full record for persistence.
    ///
    /// A non-finite `temperature` has no JSON representation and is a
    /// `Config` error rather than being written as `null`.
    pub fn to_snapshot(&self) -> Result<Value> {
        if !self.temperature.is_finite() {
            return Err(ParlaError::config(format!(
                "temperature {} cannot be persisted",
                self.temperature
            )));
        }
        Ok(serde_json::to_value(self)?)
    }

    /// Reports values outside the ranges the UI offers.
    ///
    /// The store accepts such values; callers decide whether to warn.
    pub fn advisories(&self) -> Vec<ConfigAdvisory> {
        let mut advisories = Vec::new();
        if !MAX_STEPS_RANGE.contains(&self.max_steps) {
            advisories.push(ConfigAdvisory::MaxStepsOutOfRange(self.max_steps));
        }
        if !TEMPERATURE_RANGE.contains(&self.temperature) {
            advisories.push(ConfigAdvisory::TemperatureOutOfRange(self.temperature));
        }
        advisories
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Replacement of exactly one configuration field.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigUpdate {
    ChatEndpoint(String),
    MemoryEndpoint(String),
    ResponseField(String),
    Provider(String),
    Model(String),
    MaxSteps(i64),
    Temperature(f64),
    UserId(String),
}

impl ConfigUpdate {
    /// The camelCase key of the field this update touches.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::ChatEndpoint(_) => "chatEndpoint",
            Self::MemoryEndpoint(_) => "memoryEndpoint",
            Self::ResponseField(_) => "responseField",
            Self::Provider(_) => "provider",
            Self::Model(_) => "model",
            Self::MaxSteps(_) => "maxSteps",
            Self::Temperature(_) => "temperature",
            Self::UserId(_) => "userId",
        }
    }

    pub fn apply(self, config: &mut ClientConfig) {
        match self {
            Self::ChatEndpoint(value) => config.chat_endpoint = value,
            Self::MemoryEndpoint(value) => config.memory_endpoint = value,
            Self::ResponseField(value) => config.response_field = value,
            Self::Provider(value) => config.provider = value,
            Self::Model(value) => config.model = value,
            Self::MaxSteps(value) => config.max_steps = value,
            Self::Temperature(value) => config.temperature = value,
            Self::UserId(value) => config.user_id = value,
        }
    }
}

/// A configuration value outside its UI-validated range.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigAdvisory {
    MaxStepsOutOfRange(i64),
    TemperatureOutOfRange(f64),
}

impl std::fmt::Display for ConfigAdvisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MaxStepsOutOfRange(value) => write!(
                f,
                "maxSteps {} is outside {}..={}",
                value,
                MAX_STEPS_RANGE.start(),
                MAX_STEPS_RANGE.end()
            ),
            Self::TemperatureOutOfRange(value) => write!(
                f,
                "temperature {} is outside {}..={}",
                value,
                TEMPERATURE_RANGE.start(),
                TEMPERATURE_RANGE.end()
            ),
        }
    }
}
