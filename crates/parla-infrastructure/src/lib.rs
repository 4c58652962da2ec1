pub mod config_repository;
pub mod paths;
pub mod storage;

pub use crate::config_repository::{FileConfigRepository, InMemoryConfigRepository};
pub use crate::paths::ParlaPaths;
