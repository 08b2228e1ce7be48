//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::pipeline::RunStats;
use colored::*;
use herald_domain::{FilingReference, Report};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the findings of a run.
    pub fn format_report(&self, report: &Report) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report.rows())?),
            OutputFormat::Table => Ok(self.format_report_table(report)),
            OutputFormat::Quiet => Ok(report
                .rows()
                .iter()
                .map(|row| row.product_name.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_report_table(&self, report: &Report) -> String {
        if report.is_empty() {
            return self.colorize("No new products found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Company", "Ticker", "Filed", "Product", "Description"]);

        for row in report.rows() {
            builder.push_record([
                row.company_name.clone(),
                row.ticker.clone(),
                row.filing_date.to_string(),
                row.product_name.clone(),
                row.product_description.clone(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a company's filings with their download URLs.
    pub fn format_filings(&self, filings: &[(FilingReference, String)]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = filings
                    .iter()
                    .map(|(filing, url)| {
                        serde_json::json!({
                            "filing_date": filing.filing_date.to_string(),
                            "accession_number": filing.accession.dashed(),
                            "primary_document": filing.primary_document,
                            "url": url,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                if filings.is_empty() {
                    return Ok(self.colorize("No filings found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Filed", "Accession", "Document", "URL"]);
                for (filing, url) in filings {
                    builder.push_record([
                        filing.filing_date.to_string(),
                        filing.accession.to_string(),
                        filing.primary_document.clone(),
                        url.clone(),
                    ]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
            OutputFormat::Quiet => Ok(filings
                .iter()
                .map(|(filing, _)| filing.accession.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format the end-of-run summary line.
    pub fn run_summary(&self, found: usize, stats: &RunStats, output: &str) -> String {
        let message = format!(
            "Analysis complete. Found {} products in {} filings from {} companies. Results saved to {}",
            found, stats.filings, stats.companies, output
        );
        if stats.failed_downloads > 0 {
            format!(
                "{}\n{}",
                self.success(&message),
                self.warning(&format!("{} filing(s) could not be downloaded", stats.failed_downloads))
            )
        } else {
            self.success(&message)
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Whether stdout output is suppressed to the bare minimum.
    pub fn is_quiet(&self) -> bool {
        self.format == OutputFormat::Quiet
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
