//! Batch orchestration.
//!
//! Companies are processed one after another, and each company's filings in
//! index order. Every per-company and per-filing failure is logged and
//! skipped; the returned report holds whatever succeeded.

use crate::config::Config;
use crate::error::{CliError, Result};
use herald_domain::traits::{HttpFetch, LlmProvider};
use herald_domain::{Company, FilingReference, Report, ReportRow};
use herald_edgar::{load_companies, EdgarError, FetchError, FilingCache, FilingLocator};
use herald_extractor::{normalize, ProductExtractor};
use std::time::Duration;
use tracing::{info, warn};

/// Counters collected over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Companies processed
    pub companies: usize,
    /// Filings examined
    pub filings: usize,
    /// Filings whose document could not be retrieved
    pub failed_downloads: usize,
}

/// Result of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// One row per product found
    pub report: Report,
    /// Run counters
    pub stats: RunStats,
}

/// Sequential locate → fetch → normalize → extract pipeline.
pub struct Pipeline<F, L> {
    locator: FilingLocator<F>,
    cache: FilingCache<F>,
    extractor: ProductExtractor<L>,
    filings_per_company: usize,
    filing_delay: Duration,
}

impl<F, L> Pipeline<F, L>
where
    F: HttpFetch<Error = FetchError> + Clone,
    L: LlmProvider + Sync,
    L::Error: std::fmt::Display,
{
    /// Wire the pipeline from configuration.
    pub fn new(config: &Config, fetcher: F, llm: L) -> Self {
        let edgar = &config.edgar;
        Self {
            locator: FilingLocator::new(fetcher.clone(), &edgar.submissions_url, &edgar.form_type),
            cache: FilingCache::new(fetcher, &edgar.cache_dir, &edgar.archives_url),
            extractor: ProductExtractor::new(llm, config.extractor.clone()),
            filings_per_company: config.batch.filings_per_company,
            filing_delay: config.batch.filing_delay(),
        }
    }

    /// Process every company and fold the findings into one report.
    pub async fn run(&self, companies: &[Company]) -> BatchSummary {
        let mut summary = BatchSummary::default();

        for company in companies {
            self.process_company(company, &mut summary).await;
        }

        summary
    }

    /// Process the most recent filings of one company.
    pub async fn process_company(&self, company: &Company, summary: &mut BatchSummary) {
        info!(
            "Processing {} (CIK: {}, Ticker: {})...",
            company.name, company.cik, company.ticker
        );
        summary.stats.companies += 1;

        let filings = self.locator.locate(company.cik).await;
        for filing in filings.iter().take(self.filings_per_company) {
            summary.stats.filings += 1;

            match self.process_filing(company, filing).await {
                Ok(Some(row)) => {
                    info!("  Found new product: {}", row.product_name);
                    summary.report.push(row);
                }
                Ok(None) => {}
                Err(e) => {
                    warn!("Error fetching filing content for {}: {}", filing.accession, e);
                    summary.stats.failed_downloads += 1;
                }
            }

            if !self.filing_delay.is_zero() {
                tokio::time::sleep(self.filing_delay).await;
            }
        }
    }

    async fn process_filing(
        &self,
        company: &Company,
        filing: &FilingReference,
    ) -> std::result::Result<Option<ReportRow>, EdgarError> {
        // Downloading is the only fallible step; extraction degrades to no finding
        let content = self.cache.get_or_fetch(company.cik, filing).await?;
        let text = normalize(&content);

        let finding = self
            .extractor
            .extract(&text, &company.name, &company.ticker)
            .await;

        Ok(finding.map(|finding| ReportRow::new(company, filing, &finding)))
    }
}

/// Load the company index, then run the pipeline over it.
///
/// Failure to load the company index is the only fatal error.
pub async fn run_batch<F, L>(config: &Config, fetcher: F, llm: L) -> Result<BatchSummary>
where
    F: HttpFetch<Error = FetchError> + Clone,
    L: LlmProvider + Sync,
    L::Error: std::fmt::Display,
{
    let companies = load_companies(
        &fetcher,
        &config.edgar.company_tickers_url,
        config.batch.company_limit,
    )
    .await
    .map_err(CliError::CompanyIndex)?;

    let pipeline = Pipeline::new(config, fetcher, llm);
    Ok(pipeline.run(&companies).await)
}
