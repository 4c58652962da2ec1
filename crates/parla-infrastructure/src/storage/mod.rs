//! Storage layer for atomic file operations.

mod json_storage;

pub use json_storage::{JsonFileStorage, JsonStorageError};
