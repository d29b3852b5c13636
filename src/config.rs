//! Translator configuration
//!
//! Every field has a default, so an empty JSON object is a valid config.

use std::fs;
use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event, Logger, Severity};

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Settings shared by the classifier and the method parsers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Prefix prepended to generated bucket aggregation names (default: "agg_")
    #[serde(default = "default_bucket_key_prefix")]
    pub bucket_key_prefix: String,

    /// Token marking an array-nested field path (default: "$")
    #[serde(default = "default_nested_marker")]
    pub nested_marker: String,

    /// chrono pattern for date bucket keys (default: "%Y-%m-%d %H:%M:%S")
    #[serde(default = "default_date_key_format")]
    pub date_key_format: String,

    /// Minimum severity written by the logger (default: WARN)
    #[serde(default = "default_log_level")]
    pub log_level: Severity,
}

fn default_bucket_key_prefix() -> String {
    "agg_".to_string()
}

fn default_nested_marker() -> String {
    "$".to_string()
}

fn default_date_key_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}

fn default_log_level() -> Severity {
    Severity::Warn
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            bucket_key_prefix: default_bucket_key_prefix(),
            nested_marker: default_nested_marker(),
            date_key_format: default_date_key_format(),
            log_level: default_log_level(),
        }
    }
}

impl TranslatorConfig {
    /// Load configuration from a JSON file and apply its log level
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;

        Logger::set_min_severity(config.log_level);
        let path_text = path.display().to_string();
        log_event_with_fields(Event::ConfigLoaded, &[("path", path_text.as_str())]);

        Ok(config)
    }

    /// Parse and validate configuration from JSON text
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let config: TranslatorConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.bucket_key_prefix.is_empty() {
            return Err(ConfigError::Invalid(
                "bucket_key_prefix must not be empty".into(),
            ));
        }

        if self.nested_marker.is_empty() || self.nested_marker.contains('.') {
            return Err(ConfigError::Invalid(format!(
                "nested_marker '{}' must be non-empty and contain no '.'",
                self.nested_marker
            )));
        }

        if self.date_key_format.trim().is_empty()
            || StrftimeItems::new(&self.date_key_format).any(|item| matches!(item, Item::Error))
        {
            return Err(ConfigError::Invalid(format!(
                "date_key_format '{}' is not a valid date pattern",
                self.date_key_format
            )));
        }

        Ok(())
    }
}
