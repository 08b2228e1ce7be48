//! Ollama Provider Implementation
//!
//! Provides integration with Ollama's local LLM API.
//!
//! # Features
//!
//! - Async HTTP communication with the `/api/generate` endpoint
//! - Configurable endpoint and model
//! - Retry logic with exponential backoff
//! - Optional request timeout (model inference on long filings can be slow,
//!   so none is applied unless configured)
//!
//! # Examples
//!
//! ```no_run
//! use herald_llm::OllamaProvider;
//! use herald_domain::traits::LlmProvider;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), herald_llm::LlmError> {
//! let provider = OllamaProvider::new("http://localhost:11434", "llama3.2:latest")?;
//! let text = provider.generate("Say hello").await?;
//! # Ok(())
//! # }
//! ```

use crate::LlmError;
use herald_domain::traits::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default model used for extraction
pub const DEFAULT_MODEL: &str = "llama3.2:latest";

/// Default number of attempts per prompt
pub const DEFAULT_MAX_RETRIES: u32 = 1;

/// Connection settings for an Ollama server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OllamaSettings {
    /// API endpoint (e.g., "http://localhost:11434")
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model to use (e.g., "llama3.2:latest")
    #[serde(default = "default_model")]
    pub model: String,

    /// Total attempts per prompt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Per-request timeout in seconds; unset means wait for the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

impl Default for OllamaSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            max_retries: DEFAULT_MAX_RETRIES,
            request_timeout_secs: None,
        }
    }
}

impl OllamaSettings {
    /// Validate the settings
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("llm endpoint must not be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("llm model must not be empty".to_string());
        }
        if self.max_retries == 0 {
            return Err("llm max_retries must be greater than 0".to_string());
        }
        if self.request_timeout_secs == Some(0) {
            return Err("llm request_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Get the request timeout as a Duration, if any
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Ollama API provider for local LLM inference
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
}

/// Request body for Ollama generate API
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Response from Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

impl OllamaProvider {
    /// Create a new Ollama provider without a request timeout
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Model to use (e.g., "llama3.2:latest")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Self::build(endpoint.into(), model.into(), DEFAULT_MAX_RETRIES, None)
    }

    /// Create a provider from settings
    pub fn from_settings(settings: &OllamaSettings) -> Result<Self, LlmError> {
        settings.validate().map_err(LlmError::Other)?;
        Self::build(
            settings.endpoint.clone(),
            settings.model.clone(),
            settings.max_retries,
            settings.request_timeout(),
        )
    }

    fn build(
        endpoint: String,
        model: String,
        max_retries: u32,
        timeout: Option<Duration>,
    ) -> Result<Self, LlmError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model,
            client,
            max_retries: max_retries.max(1),
        })
    }

    /// Set the maximum number of attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// One round trip to `/api/generate`
    ///
    /// `Ok(None)` signals a retryable failure whose error is stored in `last_error`.
    async fn request_once(
        &self,
        url: &str,
        prompt: &str,
        last_error: &mut Option<LlmError>,
    ) -> Result<Option<String>, LlmError> {
        let request_body = OllamaGenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = match self.client.post(url).json(&request_body).send().await {
            Ok(response) => response,
            Err(e) => {
                *last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
                return Ok(None);
            }
        };

        let status = response.status();
        if status.is_success() {
            return response
                .json::<OllamaGenerateResponse>()
                .await
                .map(|body| Some(body.response))
                .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)));
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.model.clone()));
        }

        *last_error = Some(if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            LlmError::RateLimitExceeded
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            LlmError::Communication(format!("HTTP {}: {}", status, error_text))
        });
        Ok(None)
    }
}

impl LlmProviderTrait for OllamaProvider {
    type Error = LlmError;

    fn model_name(&self) -> &str {
        &self.model
    }

    /// Generate text using the Ollama API
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Ollama is not running
    /// - Model is not available
    /// - Network communication fails
    /// - Response format is invalid
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.endpoint);
        debug!(model = %self.model, prompt_chars = prompt.len(), "Sending prompt to Ollama");

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            if let Some(text) = self.request_once(&url, prompt, &mut last_error).await? {
                return Ok(text);
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                if let Some(e) = &last_error {
                    warn!("Ollama attempt {} failed ({}), retrying in {:?}", attempts, e, delay);
                }
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }
}
