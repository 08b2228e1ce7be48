//! Herald LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `herald-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OllamaProvider`: Local Ollama API integration
//!
//! # Examples
//!
//! ```
//! use herald_llm::MockProvider;
//! use herald_domain::traits::LlmProvider;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let provider = MockProvider::new("No new product found");
//! let result = provider.generate("test prompt").await.unwrap();
//! assert_eq!(result, "No new product found");
//! # }
//! ```

#![warn(missing_docs)]

pub mod ollama;

use herald_domain::traits::LlmProvider as LlmProviderTrait;
use std::future::Future;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use ollama::{OllamaProvider, OllamaSettings};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum Canned {
    Response(String),
    Error,
}

#[derive(Debug, Default)]
struct MockState {
    rules: Vec<(String, Canned)>,
    prompts: Vec<String>,
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Rules are keyed by a substring of the prompt and checked in insertion
/// order; the first match wins, otherwise the default response is returned.
///
/// # Examples
///
/// ```
/// use herald_llm::MockProvider;
/// use herald_domain::traits::LlmProvider;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut provider = MockProvider::new("No new product found");
/// provider.add_response("Acme", "New Product Name: Rocket Skates");
///
/// let hit = provider.generate("Company: Acme Corp").await.unwrap();
/// assert_eq!(hit, "New Product Name: Rocket Skates");
///
/// let miss = provider.generate("Company: Initech").await.unwrap();
/// assert_eq!(miss, "No new product found");
/// assert_eq!(provider.call_count(), 2);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    model: String,
    default_response: String,
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            model: "mock".to_string(),
            default_response: response.into(),
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Add a response for prompts containing `needle`
    pub fn add_response(&mut self, needle: impl Into<String>, response: impl Into<String>) {
        self.lock()
            .rules
            .push((needle.into(), Canned::Response(response.into())));
    }

    /// Configure to return an error for prompts containing `needle`
    pub fn add_error(&mut self, needle: impl Into<String>) {
        self.lock().rules.push((needle.into(), Canned::Error));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.lock().prompts.len()
    }

    /// Every prompt received so far, oldest first
    pub fn prompts(&self) -> Vec<String> {
        self.lock().prompts.clone()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        self.lock().prompts.clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        // A poisoned lock only means another test thread panicked mid-update
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn respond(&self, prompt: &str) -> Result<String, LlmError> {
        let mut state = self.lock();
        state.prompts.push(prompt.to_string());

        let matched = state
            .rules
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, canned)| canned.clone());

        match matched {
            Some(Canned::Response(response)) => Ok(response),
            Some(Canned::Error) => Err(LlmError::Other("Mock error".to_string())),
            None => Ok(self.default_response.clone()),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn model_name(&self) -> &str {
        &self.model
    }

    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, Self::Error>> + Send {
        std::future::ready(self.respond(prompt))
    }
}
