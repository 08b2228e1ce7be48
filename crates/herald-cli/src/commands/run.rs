//! Run command implementation.

use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::pipeline::run_batch;
use crate::report::save_report;
use herald_edgar::ResilientFetcher;
use herald_llm::OllamaProvider;
use tracing::{info, warn};

/// Execute the run command.
pub async fn execute_run(args: RunArgs, mut config: Config, formatter: &Formatter) -> Result<()> {
    config.apply_run(&args);
    config.validate()?;

    if config.edgar.uses_placeholder_user_agent() {
        warn!("Using the placeholder contact string; set edgar.user_agent or HERALD_USER_AGENT");
    }

    let fetcher = ResilientFetcher::new(&config.edgar)?;
    let llm = OllamaProvider::from_settings(&config.llm)?;

    info!(
        "Scanning up to {} companies ({} {} filings each) with model {}",
        config.batch.company_limit,
        config.batch.filings_per_company,
        config.edgar.form_type,
        config.llm.model
    );

    let summary = run_batch(&config, fetcher, llm).await?;

    let output = &config.batch.output;
    save_report(output, &summary.report)?;
    info!(
        "Analysis complete. Found {} products. Results saved to {}",
        summary.report.len(),
        output.display()
    );

    println!("{}", formatter.format_report(&summary.report)?);
    if !formatter.is_quiet() {
        println!(
            "{}",
            formatter.run_summary(summary.report.len(), &summary.stats, &output.display().to_string())
        );
    }

    Ok(())
}
