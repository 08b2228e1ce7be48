//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use std::future::Future;

/// Trait for retrieving the body of a URL
///
/// Implemented by the infrastructure layer (herald-edgar)
pub trait HttpFetch {
    /// Error type for fetch operations
    type Error;

    /// Fetch `url` and return the response body as text
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (herald-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Name of the model completions are requested from
    fn model_name(&self) -> &str;

    /// Generate text completion
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;
}
