//! Submission export.
//!
//! Writes submission lists as CSV with a stable column order. Percentages
//! are written at full precision; styling beyond plain CSV is out of
//! scope here.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use qi_model::Submission;

/// Column headers, in output order.
const HEADERS: [&str; 12] = [
    "id",
    "indicatorCode",
    "indicatorName",
    "department",
    "entryDate",
    "numerator",
    "denominator",
    "customValues",
    "percentage",
    "benchmarkStatus",
    "remarks",
    "submittedAt",
];

/// Write submissions as CSV to any writer.
pub fn write_submissions_csv<W: Write>(writer: W, submissions: &[Submission]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(HEADERS)
        .context("failed to write CSV header")?;

    for submission in submissions {
        let record = [
            submission.id.clone(),
            submission.indicator_code.clone(),
            submission.indicator_name.clone(),
            submission.department.clone(),
            submission.entry_date.to_string(),
            optional_number(submission.numerator),
            optional_number(submission.denominator),
            custom_values_cell(submission),
            optional_number(submission.percentage),
            submission.benchmark_status.as_str().to_string(),
            submission.remarks.clone().unwrap_or_default(),
            submission.submitted_at.to_rfc3339(),
        ];
        csv_writer
            .write_record(&record)
            .with_context(|| format!("failed to write submission row: {}", submission.id))?;
    }
    csv_writer.flush().context("failed to flush CSV output")?;
    Ok(())
}

/// Write submissions as CSV to a file path.
pub fn export_submissions(path: &Path, submissions: &[Submission]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create export file: {}", path.display()))?;
    write_submissions_csv(file, submissions)
}

fn optional_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// `A=50 B=10` style cell; empty for standard submissions.
fn custom_values_cell(submission: &Submission) -> String {
    submission
        .custom_values
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join(" ")
}
