//! Command implementations.

pub mod filings;
pub mod run;

pub use self::filings::execute_filings;
pub use self::run::execute_run;
