//! Classified outcome of one extraction

use herald_domain::ProductFinding;

/// What the model said about a filing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A product name was reported
    Found(ProductFinding),

    /// The model stated that no new product was announced, or there was
    /// nothing to analyze
    NotFound,

    /// The response fit neither shape
    Malformed(String),
}

impl Outcome {
    /// Whether a product was found
    pub fn is_found(&self) -> bool {
        matches!(self, Outcome::Found(_))
    }
}
