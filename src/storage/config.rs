//! Analyzer configuration.
//!
//! Loaded from TOML. Every field is optional in the file and falls back to
//! the built-in running zones.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::metrics::zones::{HeartRateZone, DEFAULT_HR_ZONES};

/// Activity type analyzed by default.
pub const DEFAULT_SPORT: &str = "Running";

/// Analyzer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Value of the activity's `Sport` attribute that qualifies a file
    pub sport: String,
    /// Heart rate zones, in reporting order
    pub zones: Vec<HeartRateZone>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            sport: DEFAULT_SPORT.to_string(),
            zones: DEFAULT_HR_ZONES.to_vec(),
        }
    }
}

impl AnalyzerConfig {
    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AnalyzerConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can drive an analysis.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sport.trim().is_empty() {
            return Err(ConfigError::Invalid("sport must not be empty".to_string()));
        }
        if self.zones.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one zone is required".to_string(),
            ));
        }
        for (i, zone) in self.zones.iter().enumerate() {
            if zone.lower_bpm >= zone.upper_bpm {
                return Err(ConfigError::Invalid(format!(
                    "zone {} {}: lower bound must be below upper bound",
                    i, zone
                )));
            }
        }
        Ok(())
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "zonepace", "ZonePace")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the default configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load configuration.
///
/// An explicit `path` must exist. Without one, the default config file is
/// used when present, otherwise built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<AnalyzerConfig, ConfigError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default_path = get_config_path();
            if !default_path.exists() {
                tracing::debug!("No config at {:?}, using defaults", default_path);
                return Ok(AnalyzerConfig::default());
            }
            default_path
        }
    };

    let content = std::fs::read_to_string(&path)
        .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;

    let config = AnalyzerConfig::from_toml(&content)?;
    tracing::info!("Loaded {} zones from {:?}", config.zones.len(), path);
    Ok(config)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
