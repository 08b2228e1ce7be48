//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Herald - find new-product announcements in SEC 8-K filings.
#[derive(Debug, Parser)]
#[command(name = "herald")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (default: ~/.herald/config.toml)
    #[arg(short, long, global = true, env = "HERALD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Contact string sent with every EDGAR request ("Name email@example.com")
    #[arg(long, global = true, env = "HERALD_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Directory for cached filing documents
    #[arg(long, global = true, env = "HERALD_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (product names or accession numbers only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan recent 8-K filings and write the product report
    Run(RunArgs),

    /// List the 8-K filings of one company
    Filings(FilingsArgs),
}

/// Arguments for the run command.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// CSV report path
    #[arg(short, long, env = "HERALD_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Number of companies to take from the company index
    #[arg(short, long, env = "HERALD_COMPANY_LIMIT")]
    pub limit: Option<usize>,

    /// Filings to analyze per company, most recent first
    #[arg(long, env = "HERALD_FILINGS_PER_COMPANY")]
    pub filings: Option<usize>,

    /// Ollama model
    #[arg(short, long, env = "HERALD_MODEL")]
    pub model: Option<String>,

    /// Ollama endpoint
    #[arg(long, env = "HERALD_OLLAMA_URL")]
    pub endpoint: Option<String>,
}

/// Arguments for the filings command.
#[derive(Debug, Parser)]
pub struct FilingsArgs {
    /// Company CIK, padded or bare (e.g., 320193)
    pub cik: String,

    /// Maximum number of filings to show
    #[arg(short, long)]
    pub limit: Option<usize>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => Self::Table,
            CliFormat::Json => Self::Json,
            CliFormat::Quiet => Self::Quiet,
        }
    }
}
