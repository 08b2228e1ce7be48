//! Configuration for EDGAR access
//!
//! Endpoints, the identifying contact string, retry policy and the cache
//! location.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Placeholder contact string; real runs must override it
pub const DEFAULT_USER_AGENT: &str = "herald research contact@example.com";

/// Configuration for the fetcher, locator and cache
///
/// # Examples
///
/// ```
/// use herald_edgar::EdgarConfig;
///
/// let config = EdgarConfig::default();
/// assert_eq!(config.form_type, "8-K");
/// assert_eq!(config.max_retries, 3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgarConfig {
    /// Identifying contact string sent as the User-Agent on every request.
    /// The SEC fair-access policy requires a name and email address.
    pub user_agent: String,

    /// Company index (ticker/CIK/title map)
    pub company_tickers_url: String,

    /// Base URL of the per-company submissions index
    pub submissions_url: String,

    /// Base URL of the filing archive
    pub archives_url: String,

    /// Form type to keep from the submissions index (exact match)
    pub form_type: String,

    /// Total attempts per URL
    pub max_retries: u32,

    /// Base delay between attempts, in milliseconds.
    /// Network failures wait `base_delay * n` for the n-th failure; 429
    /// responses without a Retry-After header wait `base_delay`.
    pub base_delay_ms: u64,

    /// Per-request timeout (seconds)
    pub request_timeout_secs: u64,

    /// Directory holding cached filing documents
    pub cache_dir: PathBuf,
}

impl Default for EdgarConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            company_tickers_url: "https://www.sec.gov/files/company_tickers.json".to_string(),
            submissions_url: "https://data.sec.gov/submissions".to_string(),
            archives_url: "https://www.sec.gov/Archives/edgar/data".to_string(),
            form_type: "8-K".to_string(),
            max_retries: 3,
            base_delay_ms: 2_000,
            request_timeout_secs: 30,
            cache_dir: PathBuf::from("filing_cache"),
        }
    }
}

impl EdgarConfig {
    /// Get the base retry delay as a Duration
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Whether the contact string is still the shipped placeholder
    pub fn uses_placeholder_user_agent(&self) -> bool {
        self.user_agent == DEFAULT_USER_AGENT
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.user_agent.trim().is_empty() {
            return Err("user_agent must identify the requester".to_string());
        }
        for (name, url) in [
            ("company_tickers_url", &self.company_tickers_url),
            ("submissions_url", &self.submissions_url),
            ("archives_url", &self.archives_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(format!("{} must be an http(s) URL, got '{}'", name, url));
            }
        }
        if self.form_type.trim().is_empty() {
            return Err("form_type must not be empty".to_string());
        }
        if self.max_retries == 0 {
            return Err("max_retries must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        if self.cache_dir.as_os_str().is_empty() {
            return Err("cache_dir must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EdgarConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.uses_placeholder_user_agent());
        assert_eq!(config.base_delay(), Duration::from_secs(2));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_invalid_user_agent() {
        let mut config = EdgarConfig::default();
        config.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_url() {
        let mut config = EdgarConfig::default();
        config.submissions_url = "data.sec.gov/submissions".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("submissions_url"));
    }

    #[test]
    fn test_invalid_retry_budget() {
        let mut config = EdgarConfig::default();
        config.max_retries = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EdgarConfig =
            serde_json::from_str(r#"{"user_agent": "Jane jane@example.com", "max_retries": 5}"#)
                .unwrap();
        assert_eq!(config.user_agent, "Jane jane@example.com");
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.form_type, "8-K");
        assert!(!config.uses_placeholder_user_agent());
    }
}
