//! Prompt construction for product extraction

use herald_domain::DEFAULT_DESCRIPTION_MAX_CHARS;

/// Phrase the model is told to answer with when nothing was announced
pub const NO_PRODUCT_SENTINEL: &str = "No new product found";

/// Label preceding the product name in the model's answer
pub const NAME_LABEL: &str = "New Product Name:";

/// Label preceding the product description in the model's answer
pub const DESCRIPTION_LABEL: &str = "Product Description:";

/// Builds the extraction prompt for one filing
pub struct PromptBuilder<'a> {
    company_name: &'a str,
    ticker: &'a str,
    filing_text: &'a str,
    description_max_chars: usize,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(company_name: &'a str, ticker: &'a str, filing_text: &'a str) -> Self {
        Self {
            company_name,
            ticker,
            filing_text,
            description_max_chars: DEFAULT_DESCRIPTION_MAX_CHARS,
        }
    }

    /// Override the description length the model is asked to respect
    pub fn with_description_cap(mut self, max_chars: usize) -> Self {
        self.description_max_chars = max_chars;
        self
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(self.filing_text.len() + 640);

        prompt.push_str(TASK_INTRO);
        prompt.push_str("\n\n");

        prompt.push_str(&format!("Company: {}\n", self.company_name));
        prompt.push_str(&format!("Ticker: {}\n\n", self.ticker));

        prompt.push_str("Task: Extract the following information in a structured format:\n");
        prompt.push_str(&format!("1. {} [Name of the new product]\n", NAME_LABEL));
        prompt.push_str(&format!(
            "2. {} [Brief description of the product, less than {} characters]\n\n",
            DESCRIPTION_LABEL, self.description_max_chars
        ));

        prompt.push_str(&format!(
            "If no new product is mentioned in the filing, respond with \"{}\".\n\n",
            NO_PRODUCT_SENTINEL
        ));

        prompt.push_str("Filing content:\n");
        prompt.push_str(self.filing_text);
        prompt.push('\n');

        prompt
    }
}

const TASK_INTRO: &str = "Analyze this SEC 8-K filing and extract information about any new \
product releases or announcements.";
