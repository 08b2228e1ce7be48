//! Herald Extractor
//!
//! Turns a filing document into an optional new-product finding.
//!
//! # Architecture
//!
//! ```text
//! raw markup → normalize → PromptBuilder → LLM → parse_response → Outcome
//! ```
//!
//! # Key Features
//!
//! - **Text Normalization**: markup stripped, artifact glyphs removed, whitespace collapsed
//! - **Fixed Prompt Template**: company identity plus the full filing text
//! - **Deterministic Parsing**: labelled lines, a no-product sentinel, reasoning blocks dropped
//! - **Classified Outcomes**: `Found`, `NotFound` or `Malformed`, never a partial finding
//!
//! # Example Usage
//!
//! ```no_run
//! use herald_extractor::{normalize, ExtractorConfig, ProductExtractor};
//! use herald_llm::OllamaProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = OllamaProvider::new("http://localhost:11434", "llama3.2:latest")?;
//! let extractor = ProductExtractor::new(llm, ExtractorConfig::default());
//!
//! let text = normalize("<p>Acme today introduced the Widget X.</p>");
//! if let Some(finding) = extractor.extract(&text, "Acme Corp", "ACME").await {
//!     println!("{}: {}", finding.name(), finding.description());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod normalize;
mod parser;
mod prompt;
mod types;

#[cfg(test)]
mod tests;

pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::ProductExtractor;
pub use normalize::normalize;
pub use parser::{parse_response, strip_reasoning};
pub use prompt::{PromptBuilder, DESCRIPTION_LABEL, NAME_LABEL, NO_PRODUCT_SENTINEL};
pub use types::Outcome;
