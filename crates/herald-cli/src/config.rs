//! Configuration management for the CLI.
//!
//! One TOML file composes the settings of every layer:
//!
//! ```toml
//! [edgar]
//! user_agent = "Jane Analyst jane@example.com"
//!
//! [llm]
//! model = "llama3.2:latest"
//!
//! [extractor]
//! description_max_chars = 180
//!
//! [batch]
//! company_limit = 100
//! filings_per_company = 2
//! ```

use crate::cli::{Cli, RunArgs};
use crate::error::{CliError, Result};
use herald_edgar::EdgarConfig;
use herald_extractor::ExtractorConfig;
use herald_llm::OllamaSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// EDGAR endpoints, contact string, retry policy and cache
    #[serde(default)]
    pub edgar: EdgarConfig,

    /// Language model connection
    #[serde(default)]
    pub llm: OllamaSettings,

    /// Extraction settings
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Batch run policy
    #[serde(default)]
    pub batch: BatchSettings,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Batch run policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    /// Companies taken from the head of the company index
    pub company_limit: usize,

    /// Most recent filings analyzed per company
    pub filings_per_company: usize,

    /// Pause after every filing (milliseconds)
    pub filing_delay_ms: u64,

    /// CSV report path
    pub output: PathBuf,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".herald").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default path is used
    /// when present and built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply global command-line overrides.
    pub fn apply_global(&mut self, cli: &Cli) {
        if let Some(user_agent) = &cli.user_agent {
            self.edgar.user_agent = user_agent.clone();
        }
        if let Some(cache_dir) = &cli.cache_dir {
            self.edgar.cache_dir = cache_dir.clone();
        }
    }

    /// Apply `run` command overrides.
    pub fn apply_run(&mut self, args: &RunArgs) {
        if let Some(output) = &args.output {
            self.batch.output = output.clone();
        }
        if let Some(limit) = args.limit {
            self.batch.company_limit = limit;
        }
        if let Some(filings) = args.filings {
            self.batch.filings_per_company = filings;
        }
        if let Some(model) = &args.model {
            self.llm.model = model.clone();
        }
        if let Some(endpoint) = &args.endpoint {
            self.llm.endpoint = endpoint.clone();
        }
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.edgar.validate().map_err(CliError::Config)?;
        self.llm.validate().map_err(CliError::Config)?;
        self.extractor.validate().map_err(CliError::Config)?;
        self.batch.validate().map_err(CliError::Config)?;
        Ok(())
    }
}

impl BatchSettings {
    /// Get the per-filing pause as a Duration
    pub fn filing_delay(&self) -> Duration {
        Duration::from_millis(self.filing_delay_ms)
    }

    /// Validate the settings
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.company_limit == 0 {
            return Err("company_limit must be greater than 0".to_string());
        }
        if self.filings_per_company == 0 {
            return Err("filings_per_company must be greater than 0".to_string());
        }
        if self.output.as_os_str().is_empty() {
            return Err("output path must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            company_limit: 100,
            filings_per_company: 2,
            filing_delay_ms: 1_000,
            output: PathBuf::from("sec_8k_product_releases.csv"),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
