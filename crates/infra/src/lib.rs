//! Infrastructure layer: repository adapters and runtime configuration.

pub mod config;
pub mod repository;

pub use config::{AppConfig, ConfigError};
pub use repository::{InMemoryCatalogStore, PostgresCatalogStore};
