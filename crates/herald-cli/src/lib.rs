//! Herald CLI library.
//!
//! This library provides the core functionality for the `herald` binary,
//! including configuration management, the batch pipeline, report writing,
//! and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod report;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use pipeline::{run_batch, BatchSummary, Pipeline, RunStats};
