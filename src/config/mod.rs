//! Configuration models for the API client, the store backend and loop timings.

pub mod settings;

pub use settings::{parse_duration, AppConfig, ConfigError, ServerConfig, StoreBackendConfig};
