//! Error types for EDGAR access

use thiserror::Error;

/// Errors from the resilient fetcher
#[derive(Error, Debug)]
pub enum FetchError {
    /// Terminal HTTP status (anything other than 200 or 429)
    #[error("HTTP {status} for {url}")]
    Status {
        /// Status code returned by the server
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Retry budget exhausted while the server kept answering 429
    #[error("Rate limited after {attempts} attempts")]
    RateLimited {
        /// Attempts made
        attempts: u32,
    },

    /// Retry budget exhausted by transport failures (timeouts, connection errors)
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Errors that can occur while locating, caching or indexing filings
#[derive(Error, Debug)]
pub enum EdgarError {
    /// Fetch failure
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Submissions index is missing expected fields or has inconsistent arrays
    #[error("Malformed filings index: {0}")]
    MalformedIndex(String),

    /// Company index could not be interpreted
    #[error("Malformed company index: {0}")]
    MalformedCompanyIndex(String),
}
