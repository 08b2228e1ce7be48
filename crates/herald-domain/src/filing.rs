//! Filing module - references to individual regulatory filings

use crate::company::Cik;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// Number of digits in an accession number (10 filer + 2 year + 6 sequence)
const ACCESSION_DIGITS: usize = 18;

/// Provider-assigned identifier of one filing submission
///
/// Stored in its canonical dashed form (`0000320193-24-000123`). The
/// undashed form is what the archive download paths use.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccessionNumber(String);

impl AccessionNumber {
    /// The canonical dashed form
    pub fn dashed(&self) -> &str {
        &self.0
    }

    /// The dash-stripped form used in archive paths
    ///
    /// # Examples
    ///
    /// ```
    /// use herald_domain::AccessionNumber;
    ///
    /// let accession: AccessionNumber = "0000320193-24-000123".parse().unwrap();
    /// assert_eq!(accession.undashed(), "000032019324000123");
    /// ```
    pub fn undashed(&self) -> String {
        self.0.replace('-', "")
    }
}

impl fmt::Display for AccessionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AccessionNumber {
    type Err = String;

    /// Accepts the dashed form as-is, and promotes a bare 18-digit string to
    /// the canonical `10-2-6` dashed layout.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Accession number is empty".to_string());
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
            return Err(format!("Invalid accession number: '{}'", s));
        }
        if !trimmed.bytes().any(|b| b.is_ascii_digit()) {
            return Err(format!("Accession number has no digits: '{}'", s));
        }

        if !trimmed.contains('-') && trimmed.len() == ACCESSION_DIGITS {
            return Ok(Self(format!(
                "{}-{}-{}",
                &trimmed[..10],
                &trimmed[10..12],
                &trimmed[12..]
            )));
        }

        Ok(Self(trimmed.to_string()))
    }
}

/// A filing located in a company's submissions index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilingReference {
    /// Date the filing was accepted
    pub filing_date: NaiveDate,

    /// Accession identifier
    pub accession: AccessionNumber,

    /// File name of the primary document within the filing
    pub primary_document: String,
}

impl FilingReference {
    /// Create a new filing reference
    pub fn new(
        filing_date: NaiveDate,
        accession: AccessionNumber,
        primary_document: impl Into<String>,
    ) -> Self {
        Self {
            filing_date,
            accession,
            primary_document: primary_document.into(),
        }
    }

    /// Archive path of the primary document, relative to the archive root
    ///
    /// `{cik}/{accession-undashed}/{primary_document}`
    pub fn archive_path(&self, cik: Cik) -> String {
        format!(
            "{}/{}/{}",
            cik,
            self.accession.undashed(),
            self.primary_document
        )
    }

    /// Durable cache key for this filing
    ///
    /// Built from the dashed accession form, independent of the download path.
    pub fn cache_key(&self, cik: Cik) -> String {
        format!("{}_{}", cik, self.accession.dashed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> FilingReference {
        FilingReference::new(
            NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
            "0000320193-24-000123".parse().unwrap(),
            "aapl-20241101.htm",
        )
    }

    #[test]
    fn test_accession_forms() {
        let accession: AccessionNumber = "0000320193-24-000123".parse().unwrap();
        assert_eq!(accession.dashed(), "0000320193-24-000123");
        assert_eq!(accession.undashed(), "000032019324000123");
        assert_eq!(accession.to_string(), "0000320193-24-000123");
    }

    #[test]
    fn test_accession_undashed_input_is_canonicalised() {
        let accession: AccessionNumber = "000032019324000123".parse().unwrap();
        assert_eq!(accession.dashed(), "0000320193-24-000123");
    }

    #[test]
    fn test_accession_rejects_invalid() {
        assert!("".parse::<AccessionNumber>().is_err());
        assert!("   ".parse::<AccessionNumber>().is_err());
        assert!("---".parse::<AccessionNumber>().is_err());
        assert!("0000320193/24/000123".parse::<AccessionNumber>().is_err());
        assert!("../../etc".parse::<AccessionNumber>().is_err());
    }

    #[test]
    fn test_archive_path_uses_undashed_accession() {
        let cik = Cik::new(320193).unwrap();
        assert_eq!(
            reference().archive_path(cik),
            "0000320193/000032019324000123/aapl-20241101.htm"
        );
    }

    #[test]
    fn test_cache_key_uses_dashed_accession() {
        let cik = Cik::new(320193).unwrap();
        assert_eq!(reference().cache_key(cik), "0000320193_0000320193-24-000123");
    }
}
