//! Herald Domain Layer
//!
//! Core value types and trait seams shared by every other Herald crate.
//! Nothing in here performs I/O; network, storage and model access are
//! expressed as traits and implemented in the infrastructure crates.
//!
//! ## Key Concepts
//!
//! - **Company**: a filer, identified by its zero-padded 10-digit CIK
//! - **FilingReference**: one filing located in a company's submissions index
//! - **ProductFinding**: a new-product announcement extracted from a filing
//! - **Report**: the append-only table of findings written at the end of a run
//!
//! ## Seams
//!
//! - [`traits::HttpFetch`]: fetch a URL and return its body
//! - [`traits::LlmProvider`]: complete a prompt with a language model

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod company;
pub mod filing;
pub mod finding;
pub mod traits;

// Re-exports for convenience
pub use company::{Cik, Company};
pub use filing::{AccessionNumber, FilingReference};
pub use finding::{ProductFinding, Report, ReportRow, DEFAULT_DESCRIPTION_MAX_CHARS};
