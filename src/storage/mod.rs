//! Configuration storage.

pub mod config;

pub use config::{load_config, AnalyzerConfig, ConfigError};
