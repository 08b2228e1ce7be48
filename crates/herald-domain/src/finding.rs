//! Findings and the report table they are folded into

use crate::company::Company;
use crate::filing::FilingReference;
use chrono::NaiveDate;
use serde::Serialize;

/// Default cap on the length of a product description (characters)
pub const DEFAULT_DESCRIPTION_MAX_CHARS: usize = 180;

/// A new-product announcement extracted from a filing
///
/// Either fully populated or absent: the product name is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFinding {
    name: String,
    description: String,
}

impl ProductFinding {
    /// Build a finding, truncating the description to `max_description_chars`
    ///
    /// Returns `None` when the name is blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use herald_domain::ProductFinding;
    ///
    /// let finding = ProductFinding::new("Widget X", "A new widget.", 180).unwrap();
    /// assert_eq!(finding.name(), "Widget X");
    /// assert!(ProductFinding::new("  ", "orphan description", 180).is_none());
    /// ```
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        max_description_chars: usize,
    ) -> Option<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return None;
        }

        let description = description.into();
        let description = match description.char_indices().nth(max_description_chars) {
            Some((cut, _)) => description[..cut].to_string(),
            None => description,
        };

        Some(Self { name, description })
    }

    /// Product name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Product description (possibly empty)
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// One row of the output report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// Company display name
    pub company_name: String,

    /// Ticker symbol
    #[serde(rename = "stock_name")]
    pub ticker: String,

    /// Date of the filing the product was found in
    #[serde(rename = "filing_time")]
    pub filing_date: NaiveDate,

    /// Product name
    #[serde(rename = "new_product")]
    pub product_name: String,

    /// Product description
    pub product_description: String,
}

impl ReportRow {
    /// Column headers, in output order
    pub const HEADERS: [&'static str; 5] = [
        "company_name",
        "stock_name",
        "filing_time",
        "new_product",
        "product_description",
    ];

    /// Assemble a row from its sources
    pub fn new(company: &Company, filing: &FilingReference, finding: &ProductFinding) -> Self {
        Self {
            company_name: company.name.clone(),
            ticker: company.ticker.clone(),
            filing_date: filing.filing_date,
            product_name: finding.name().to_string(),
            product_description: finding.description().to_string(),
        }
    }
}

/// Append-only table of findings accumulated over a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    rows: Vec<ReportRow>,
}

impl Report {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row
    pub fn push(&mut self, row: ReportRow) {
        self.rows.push(row);
    }

    /// All rows, in insertion order
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the report has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Extend<ReportRow> for Report {
    fn extend<I: IntoIterator<Item = ReportRow>>(&mut self, iter: I) {
        self.rows.extend(iter);
    }
}

impl FromIterator<ReportRow> for Report {
    fn from_iter<I: IntoIterator<Item = ReportRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
