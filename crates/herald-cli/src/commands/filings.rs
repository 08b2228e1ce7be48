//! Filings command implementation.

use crate::cli::FilingsArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use herald_domain::Cik;
use herald_edgar::{FilingCache, FilingLocator, ResilientFetcher};

/// Execute the filings command.
pub async fn execute_filings(args: FilingsArgs, config: Config, formatter: &Formatter) -> Result<()> {
    let cik: Cik = args.cik.parse().map_err(CliError::InvalidInput)?;
    if args.limit == Some(0) {
        return Err(CliError::InvalidInput("limit must be greater than 0".to_string()));
    }
    config.edgar.validate().map_err(CliError::Config)?;

    let fetcher = ResilientFetcher::new(&config.edgar)?;
    let edgar = &config.edgar;
    let locator = FilingLocator::new(fetcher.clone(), &edgar.submissions_url, &edgar.form_type);
    let cache = FilingCache::new(fetcher, &edgar.cache_dir, &edgar.archives_url);

    // Surface lookup failures here instead of degrading to an empty list
    let filings = locator.try_locate(cik).await?;

    let rows: Vec<_> = filings
        .into_iter()
        .take(args.limit.unwrap_or(usize::MAX))
        .map(|filing| {
            let url = cache.document_url(cik, &filing);
            (filing, url)
        })
        .collect();

    println!("{}", formatter.format_filings(&rows)?);

    Ok(())
}
