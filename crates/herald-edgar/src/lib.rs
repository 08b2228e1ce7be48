//! Herald EDGAR Access
//!
//! Everything that talks to the SEC's EDGAR endpoints.
//!
//! # Architecture
//!
//! ```text
//! company index ──► Vec<Company>
//! submissions index ──► FilingLocator ──► Vec<FilingReference>
//! FilingReference ──► FilingCache ──(miss)──► ResilientFetcher ──► archive
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use herald_edgar::{EdgarConfig, FilingCache, FilingLocator, ResilientFetcher};
//! use herald_domain::Cik;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = EdgarConfig {
//!     user_agent: "Jane Analyst jane@example.com".to_string(),
//!     ..EdgarConfig::default()
//! };
//! let fetcher = ResilientFetcher::new(&config)?;
//! let locator = FilingLocator::new(fetcher.clone(), &config.submissions_url, &config.form_type);
//! let cache = FilingCache::new(fetcher, &config.cache_dir, &config.archives_url);
//!
//! let cik: Cik = "320193".parse()?;
//! for filing in locator.locate(cik).await.into_iter().take(2) {
//!     let html = cache.get_or_fetch(cik, &filing).await?;
//!     println!("{}: {} bytes", filing.accession, html.len());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod cache;
mod companies;
mod config;
mod error;
mod fetcher;
mod locator;

pub use cache::FilingCache;
pub use companies::{load_companies, parse_company_index};
pub use config::{EdgarConfig, DEFAULT_USER_AGENT};
pub use error::{EdgarError, FetchError};
pub use fetcher::{decode_lossy, parse_retry_after, ResilientFetcher};
pub use locator::{parse_submissions, FilingLocator};
