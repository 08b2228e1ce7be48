//! Company module - the filers whose disclosures are scanned

use std::fmt;
use std::str::FromStr;

/// Largest value representable in the 10-digit CIK format
const MAX_CIK: u64 = 9_999_999_999;

/// Central Index Key assigned by the SEC to every filer
///
/// Always rendered as a fixed-width, zero-padded 10-digit string, which is
/// the form the submissions index and the archive paths expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cik(u64);

impl Cik {
    /// Create a CIK from its numeric value
    ///
    /// # Examples
    ///
    /// ```
    /// use herald_domain::Cik;
    ///
    /// let cik = Cik::new(320193).unwrap();
    /// assert_eq!(cik.to_string(), "0000320193");
    /// ```
    pub fn new(value: u64) -> Result<Self, String> {
        if value > MAX_CIK {
            return Err(format!("CIK {} exceeds 10 digits", value));
        }
        Ok(Self(value))
    }

    /// Get the raw numeric value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Cik {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:010}", self.0)
    }
}

impl FromStr for Cik {
    type Err = String;

    /// Parse either the padded ("0000320193") or bare ("320193") form
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let trimmed = trimmed
            .strip_prefix("CIK")
            .or_else(|| trimmed.strip_prefix("cik"))
            .unwrap_or(trimmed);

        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("Invalid CIK: '{}'", s));
        }

        let value = trimmed
            .parse::<u64>()
            .map_err(|e| format!("Invalid CIK '{}': {}", s, e))?;
        Self::new(value)
    }
}

/// A public company taken from the company index
///
/// Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    /// SEC identifier
    pub cik: Cik,

    /// Stock ticker symbol
    pub ticker: String,

    /// Display name
    pub name: String,
}

impl Company {
    /// Create a new company record
    pub fn new(cik: Cik, ticker: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            cik,
            ticker: ticker.into(),
            name: name.into(),
        }
    }
}
