//! Filing locator
//!
//! Queries a company's submissions index and keeps the filings of the target
//! form type, most recent first as served upstream.

use crate::error::{EdgarError, FetchError};
use chrono::NaiveDate;
use herald_domain::traits::HttpFetch;
use herald_domain::{AccessionNumber, Cik, FilingReference};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Top level of `CIK##########.json`
#[derive(Debug, Deserialize)]
struct Submissions {
    #[serde(default)]
    filings: Option<SubmissionFilings>,
}

#[derive(Debug, Deserialize)]
struct SubmissionFilings {
    #[serde(default)]
    recent: Option<RecentFilings>,
}

/// Parallel arrays, one element per filing
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecentFilings {
    #[serde(default)]
    form: Vec<String>,
    #[serde(default)]
    filing_date: Vec<String>,
    #[serde(default)]
    accession_number: Vec<String>,
    #[serde(default)]
    primary_document: Vec<String>,
}

/// Parse a submissions index and keep entries whose form equals `form_type`
///
/// A missing `filings.recent` section is an empty result. A matching entry
/// whose parallel arrays are too short makes the whole index malformed. An
/// entry with an unparseable date or accession, or an unusable document
/// name, is skipped with a warning.
pub fn parse_submissions(body: &str, form_type: &str) -> Result<Vec<FilingReference>, EdgarError> {
    let submissions: Submissions = serde_json::from_str(body)
        .map_err(|e| EdgarError::MalformedIndex(format!("JSON parse error: {}", e)))?;

    let Some(recent) = submissions.filings.and_then(|f| f.recent) else {
        return Ok(Vec::new());
    };

    let mut filings = Vec::new();
    for (idx, _) in recent
        .form
        .iter()
        .enumerate()
        .filter(|(_, form)| form.as_str() == form_type)
    {
        let entry = RawEntry::at(&recent, idx)?;
        match entry.parse() {
            Ok(filing) => filings.push(filing),
            Err(reason) => warn!("Skipping submissions entry {}: {}", idx, reason),
        }
    }

    Ok(filings)
}

/// One row of the parallel arrays, before validation
struct RawEntry<'a> {
    filing_date: &'a str,
    accession: &'a str,
    primary_document: &'a str,
}

impl<'a> RawEntry<'a> {
    fn at(recent: &'a RecentFilings, idx: usize) -> Result<Self, EdgarError> {
        let field = |values: &'a [String], name: &str| -> Result<&'a str, EdgarError> {
            values
                .get(idx)
                .map(String::as_str)
                .ok_or_else(|| EdgarError::MalformedIndex(format!("entry {} has no {}", idx, name)))
        };

        Ok(Self {
            filing_date: field(&recent.filing_date, "filingDate")?,
            accession: field(&recent.accession_number, "accessionNumber")?,
            primary_document: field(&recent.primary_document, "primaryDocument")?,
        })
    }

    fn parse(&self) -> Result<FilingReference, String> {
        let filing_date = NaiveDate::parse_from_str(self.filing_date, "%Y-%m-%d")
            .map_err(|e| format!("invalid filingDate '{}': {}", self.filing_date, e))?;

        let accession: AccessionNumber = self.accession.parse()?;

        if self.primary_document.trim().is_empty() || self.primary_document.contains("..") {
            return Err(format!("invalid primaryDocument '{}'", self.primary_document));
        }

        Ok(FilingReference::new(filing_date, accession, self.primary_document))
    }
}

/// Finds a company's filings of one form type
#[derive(Debug, Clone)]
pub struct FilingLocator<F> {
    fetcher: F,
    submissions_url: String,
    form_type: String,
}

impl<F> FilingLocator<F>
where
    F: HttpFetch<Error = FetchError>,
{
    /// Create a locator
    ///
    /// - `submissions_url`: base URL of the submissions index (no trailing `CIK….json`)
    /// - `form_type`: form to keep, compared by exact string equality
    pub fn new(fetcher: F, submissions_url: impl Into<String>, form_type: impl Into<String>) -> Self {
        Self {
            fetcher,
            submissions_url: submissions_url.into().trim_end_matches('/').to_string(),
            form_type: form_type.into(),
        }
    }

    /// The form type this locator keeps
    pub fn form_type(&self) -> &str {
        &self.form_type
    }

    /// URL of a company's submissions index
    pub fn index_url(&self, cik: Cik) -> String {
        format!("{}/CIK{}.json", self.submissions_url, cik)
    }

    /// Fetch and parse the index, surfacing every failure
    pub async fn try_locate(&self, cik: Cik) -> Result<Vec<FilingReference>, EdgarError> {
        let url = self.index_url(cik);
        debug!(%cik, url = %url, "Querying submissions index");
        let body = self.fetcher.fetch(&url).await?;
        parse_submissions(&body, &self.form_type)
    }

    /// Locate filings, degrading every failure to an empty list
    pub async fn locate(&self, cik: Cik) -> Vec<FilingReference> {
        match self.try_locate(cik).await {
            Ok(filings) => {
                if filings.is_empty() {
                    info!("No {} filings found for CIK {}", self.form_type, cik);
                }
                filings
            }
            Err(e) => {
                warn!("Error fetching {} filings for CIK {}: {}", self.form_type, cik, e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"{
        "cik": "320193",
        "name": "Apple Inc.",
        "filings": {
            "recent": {
                "form": ["8-K", "10-K", "8-K", "8-K/A"],
                "filingDate": ["2024-11-01", "2024-10-30", "2024-08-01", "2024-07-15"],
                "accessionNumber": [
                    "0000320193-24-000123",
                    "0000320193-24-000120",
                    "0000320193-24-000081",
                    "0000320193-24-000070"
                ],
                "primaryDocument": ["a.htm", "b.htm", "c.htm", "d.htm"]
            },
            "files": []
        }
    }"#;

    #[test]
    fn test_filters_by_exact_form_type() {
        let filings = parse_submissions(INDEX, "8-K").unwrap();
        assert_eq!(filings.len(), 2);
        assert_eq!(filings[0].accession.dashed(), "0000320193-24-000123");
        assert_eq!(filings[0].primary_document, "a.htm");
        assert_eq!(filings[0].filing_date, NaiveDate::from_ymd_opt(2024, 11, 1).unwrap());
        assert_eq!(filings[1].accession.dashed(), "0000320193-24-000081");
    }

    #[test]
    fn test_amendment_is_not_the_base_form() {
        let filings = parse_submissions(INDEX, "8-K/A").unwrap();
        assert_eq!(filings.len(), 1);
        assert_eq!(filings[0].primary_document, "d.htm");
    }

    #[test]
    fn test_keeps_upstream_order() {
        let filings = parse_submissions(INDEX, "8-K").unwrap();
        assert!(filings[0].filing_date > filings[1].filing_date);
    }

    #[test]
    fn test_two_form_scenario() {
        let body = r#"{"filings":{"recent":{
            "form":["8-K","10-K"],
            "filingDate":["2024-01-02","2024-01-03"],
            "accessionNumber":["0000000001-24-000001","0000000001-24-000002"],
            "primaryDocument":["eightk.htm","tenk.htm"]
        }}}"#;
        let filings = parse_submissions(body, "8-K").unwrap();
        assert_eq!(filings.len(), 1);
        assert_eq!(filings[0].primary_document, "eightk.htm");
    }

    #[test]
    fn test_missing_recent_section_is_empty() {
        assert!(parse_submissions("{}", "8-K").unwrap().is_empty());
        assert!(parse_submissions(r#"{"filings": {}}"#, "8-K").unwrap().is_empty());
    }

    #[test]
    fn test_no_matching_form_is_empty() {
        assert!(parse_submissions(INDEX, "S-1").unwrap().is_empty());
    }

    #[test]
    fn test_short_parallel_array_is_malformed() {
        let body = r#"{"filings":{"recent":{
            "form":["8-K"],
            "filingDate":[],
            "accessionNumber":["0000000001-24-000001"],
            "primaryDocument":["a.htm"]
        }}}"#;
        let result = parse_submissions(body, "8-K");
        assert!(matches!(result, Err(EdgarError::MalformedIndex(msg)) if msg.contains("filingDate")));
    }

    #[test]
    fn test_bad_date_is_skipped() {
        let body = r#"{"filings":{"recent":{
            "form":["8-K"],
            "filingDate":["11/01/2024"],
            "accessionNumber":["0000000001-24-000001"],
            "primaryDocument":["a.htm"]
        }}}"#;
        assert!(parse_submissions(body, "8-K").unwrap().is_empty());
    }

    #[test]
    fn test_path_traversal_document_is_skipped() {
        let body = r#"{"filings":{"recent":{
            "form":["8-K"],
            "filingDate":["2024-11-01"],
            "accessionNumber":["0000000001-24-000001"],
            "primaryDocument":["../../secret"]
        }}}"#;
        assert!(parse_submissions(body, "8-K").unwrap().is_empty());
    }

    #[test]
    fn test_bad_older_entry_keeps_recent_filings() {
        let body = r#"{"filings":{"recent":{
            "form":["8-K","8-K","8-K","8-K"],
            "filingDate":["2024-11-01","2024-08-01","2019-03-04","2018-01-02"],
            "accessionNumber":[
                "0000000001-24-000002",
                "0000000001-24-000001",
                "0000000001-19-000009",
                "not-an-accession"
            ],
            "primaryDocument":["new.htm","older.htm","","ancient.htm"]
        }}}"#;
        let filings = parse_submissions(body, "8-K").unwrap();
        let documents: Vec<_> = filings.iter().map(|f| f.primary_document.as_str()).collect();
        assert_eq!(documents, vec!["new.htm", "older.htm"]);
    }

    #[test]
    fn test_non_json_is_malformed() {
        assert!(matches!(
            parse_submissions("<html>blocked</html>", "8-K"),
            Err(EdgarError::MalformedIndex(_))
        ));
    }
}
