//! CSV report writer.

use crate::error::Result;
use herald_domain::{Report, ReportRow};
use std::fs;
use std::io;
use std::path::Path;

/// Write the report as CSV.
///
/// The header row is always written, so an empty report is a header-only file.
pub fn write_report<W: io::Write>(writer: W, report: &Report) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(ReportRow::HEADERS)?;
    for row in report.rows() {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the report to a file, creating parent directories as needed.
pub fn save_report(path: &Path, report: &Report) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;
    write_report(io::BufWriter::new(file), report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use herald_domain::{Cik, Company, FilingReference, ProductFinding};

    fn row(name: &str, description: &str) -> ReportRow {
        let company = Company::new(Cik::new(320193).unwrap(), "AAPL", "Apple Inc.");
        let filing = FilingReference::new(
            NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
            "0000320193-24-000123".parse().unwrap(),
            "aapl-20241101.htm",
        );
        let finding = ProductFinding::new(name, description, 180).unwrap();
        ReportRow::new(&company, &filing, &finding)
    }

    fn render(report: &Report) -> String {
        let mut buffer = Vec::new();
        write_report(&mut buffer, report).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_empty_report_has_header() {
        assert_eq!(
            render(&Report::new()),
            "company_name,stock_name,filing_time,new_product,product_description\n"
        );
    }

    #[test]
    fn test_rows_follow_header() {
        let report: Report = vec![row("Widget X", "A new widget.")].into_iter().collect();
        assert_eq!(
            render(&report),
            "company_name,stock_name,filing_time,new_product,product_description\n\
             Apple Inc.,AAPL,2024-11-01,Widget X,A new widget.\n"
        );
    }

    #[test]
    fn test_fields_are_quoted_when_needed() {
        let report: Report = vec![row("Widget, \"Pro\"", "Faster, smaller.")].into_iter().collect();
        let output = render(&report);
        assert!(output.contains("\"Widget, \"\"Pro\"\"\",\"Faster, smaller.\""));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("out.csv");

        save_report(&path, &Report::new()).unwrap();
        assert!(fs::read_to_string(&path).unwrap().starts_with("company_name,"));
    }
}
