//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The company index could not be loaded; nothing else can run
    #[error("Failed to load company index: {0}")]
    CompanyIndex(herald_edgar::EdgarError),

    /// EDGAR access error
    #[error("EDGAR error: {0}")]
    Edgar(#[from] herald_edgar::EdgarError),

    /// LLM provider setup error
    #[error("LLM error: {0}")]
    Llm(#[from] herald_llm::LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV report error
    #[error("Report error: {0}")]
    Csv(#[from] csv::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<herald_edgar::FetchError> for CliError {
    fn from(e: herald_edgar::FetchError) -> Self {
        CliError::Edgar(e.into())
    }
}
