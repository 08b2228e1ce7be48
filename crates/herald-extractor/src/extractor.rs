//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_response;
use crate::prompt::PromptBuilder;
use crate::types::Outcome;
use herald_domain::traits::LlmProvider;
use herald_domain::ProductFinding;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Turns normalized filing text into a product finding
pub struct ProductExtractor<L> {
    llm_provider: L,
    config: ExtractorConfig,
}

impl<L> ProductExtractor<L>
where
    L: LlmProvider + Sync,
    L::Error: std::fmt::Display,
{
    /// Create a new Extractor
    pub fn new(llm_provider: L, config: ExtractorConfig) -> Self {
        Self {
            llm_provider,
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Model completions are requested from
    pub fn model_name(&self) -> &str {
        self.llm_provider.model_name()
    }

    /// Ask the model about one filing and classify its answer
    ///
    /// Empty text is `NotFound` without a model call. Model failures and
    /// timeouts are errors; a response that cannot be read is `Malformed`.
    pub async fn analyze(
        &self,
        filing_text: &str,
        company_name: &str,
        ticker: &str,
    ) -> Result<Outcome, ExtractorError> {
        if filing_text.trim().is_empty() {
            debug!("Empty filing text for {}; skipping model call", company_name);
            return Ok(Outcome::NotFound);
        }

        let prompt = PromptBuilder::new(company_name, ticker, filing_text)
            .with_description_cap(self.config.description_max_chars)
            .build();

        debug!(
            model = self.llm_provider.model_name(),
            "Prompt length: {} chars",
            prompt.len()
        );

        let raw = match self.config.extraction_timeout() {
            Some(limit) => timeout(limit, self.call_llm(&prompt))
                .await
                .map_err(|_| ExtractorError::Timeout(limit))??,
            None => self.call_llm(&prompt).await?,
        };

        debug!("LLM response length: {} chars", raw.len());

        Ok(parse_response(&raw, self.config.description_max_chars))
    }

    /// Extract a product finding, degrading every failure to `None`
    pub async fn extract(
        &self,
        filing_text: &str,
        company_name: &str,
        ticker: &str,
    ) -> Option<ProductFinding> {
        match self.analyze(filing_text, company_name, ticker).await {
            Ok(Outcome::Found(finding)) => {
                info!("Extracted product '{}' for {}", finding.name(), company_name);
                Some(finding)
            }
            Ok(Outcome::NotFound) => None,
            Ok(Outcome::Malformed(reason)) => {
                warn!("Unreadable model response for {}: {}", company_name, reason);
                None
            }
            Err(e) => {
                warn!("Error extracting product info for {}: {}", company_name, e);
                None
            }
        }
    }

    async fn call_llm(&self, prompt: &str) -> Result<String, ExtractorError> {
        self.llm_provider
            .generate(prompt)
            .await
            .map_err(|e| ExtractorError::Llm(e.to_string()))
    }
}
