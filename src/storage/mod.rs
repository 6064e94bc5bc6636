//! Storage module for the durable key-value backing and configuration.

pub mod backing;
pub mod config;
pub mod keyvalue;
pub mod schema;

pub use backing::{BackingStore, MemoryStore, StorageError};
pub use config::{load_config, save_config, AppConfig, ConfigError};
pub use keyvalue::KeyValueStore;
