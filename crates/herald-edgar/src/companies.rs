//! Company index loading
//!
//! The index is a JSON object of records keyed by row number:
//!
//! ```json
//! {"0": {"cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc."}}
//! ```
//!
//! Upstream key order is preserved.

use crate::error::{EdgarError, FetchError};
use herald_domain::traits::HttpFetch;
use herald_domain::{Cik, Company};
use serde_json::Value;
use tracing::{info, warn};

/// Parse the company index, reading at most `limit` records
///
/// Records without a usable `cik_str` are skipped with a warning. Anything
/// other than a top-level JSON object is an error.
pub fn parse_company_index(body: &str, limit: usize) -> Result<Vec<Company>, EdgarError> {
    let index: Value = serde_json::from_str(body)
        .map_err(|e| EdgarError::MalformedCompanyIndex(format!("JSON parse error: {}", e)))?;

    let records = index
        .as_object()
        .ok_or_else(|| EdgarError::MalformedCompanyIndex("expected a JSON object".to_string()))?;

    let companies = records
        .iter()
        .take(limit)
        .filter_map(|(key, record)| match parse_record(record) {
            Ok(company) => Some(company),
            Err(reason) => {
                warn!("Skipping company index row {}: {}", key, reason);
                None
            }
        })
        .collect();

    Ok(companies)
}

fn parse_record(record: &Value) -> Result<Company, String> {
    let cik = match record.get("cik_str") {
        Some(Value::Number(n)) => n
            .as_u64()
            .ok_or_else(|| format!("cik_str {} is not a non-negative integer", n))
            .and_then(Cik::new)?,
        Some(Value::String(s)) => s.parse::<Cik>()?,
        Some(Value::Null) | None => return Err("missing 'cik_str'".to_string()),
        Some(other) => return Err(format!("invalid cik_str {}", other)),
    };

    let text = |name: &str| {
        record
            .get(name)
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default()
            .to_string()
    };

    Ok(Company::new(cik, text("ticker"), text("title")))
}

/// Fetch and parse the company index
///
/// Any failure here is fatal for a batch run, so errors are returned rather
/// than degraded.
pub async fn load_companies<F>(fetcher: &F, url: &str, limit: usize) -> Result<Vec<Company>, EdgarError>
where
    F: HttpFetch<Error = FetchError>,
{
    let body = fetcher.fetch(url).await?;
    let companies = parse_company_index(&body, limit)?;
    info!("Loaded {} companies from {}", companies.len(), url);
    Ok(companies)
}
