//! Configuration for the Extractor

use herald_domain::DEFAULT_DESCRIPTION_MAX_CHARS;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum product description length (characters)
    pub description_max_chars: usize,

    /// Maximum time for a single model call (seconds), unbounded when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_timeout_secs: Option<u64>,
}

impl ExtractorConfig {
    /// Get the extraction timeout as a Duration
    pub fn extraction_timeout(&self) -> Option<Duration> {
        self.extraction_timeout_secs.map(Duration::from_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.description_max_chars == 0 {
            return Err("description_max_chars must be greater than 0".to_string());
        }
        if self.extraction_timeout_secs == Some(0) {
            return Err("extraction_timeout_secs must be greater than 0 when set".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            description_max_chars: DEFAULT_DESCRIPTION_MAX_CHARS,
            extraction_timeout_secs: None,
        }
    }
}
