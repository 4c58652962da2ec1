//! Client configuration domain module.
//!
//! - `model`: the configuration record (`ClientConfig`), typed single-field
//!   updates (`ConfigUpdate`) and advisory range checks (`ConfigAdvisory`)
//! - `repository`: the persistence seam (`ConfigRepository`)

mod model;
mod repository;

pub use model::{
    ClientConfig, ConfigAdvisory, ConfigUpdate, DEFAULT_CHAT_ENDPOINT, DEFAULT_MAX_STEPS,
    DEFAULT_MEMORY_ENDPOINT, DEFAULT_MODEL, DEFAULT_PROVIDER, DEFAULT_RESPONSE_FIELD,
    DEFAULT_TEMPERATURE, DEFAULT_USER_ID, MAX_STEPS_RANGE, TEMPERATURE_RANGE,
};
pub use repository::{CONFIG_STORAGE_KEY, ConfigRepository};
