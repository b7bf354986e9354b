use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeZone, Utc};

use qi_model::{BenchmarkStatus, Submission};
use qi_report::write_submissions_csv;

fn sample_submissions() -> Vec<Submission> {
    let mut custom_values = BTreeMap::new();
    custom_values.insert("A".to_string(), 50.0);
    custom_values.insert("B".to_string(), 10.0);
    vec![
        Submission {
            id: "sub-1".to_string(),
            mapping_id: "map-001".to_string(),
            indicator_code: "QI-01".to_string(),
            indicator_name: "Hand hygiene compliance".to_string(),
            department: "Infection Control".to_string(),
            numerator: Some(93.0),
            denominator: Some(100.0),
            custom_values: BTreeMap::new(),
            percentage: Some(93.0),
            benchmark_status: BenchmarkStatus::Compliant,
            status_message: String::new(),
            remarks: None,
            entry_date: NaiveDate::from_ymd_opt(2025, 4, 2).expect("date"),
            entry_month: 4,
            submitted_at: Utc.with_ymd_and_hms(2025, 4, 2, 8, 0, 0).unwrap(),
        },
        Submission {
            id: "sub-2".to_string(),
            mapping_id: "map-002".to_string(),
            indicator_code: "QI-12".to_string(),
            indicator_name: "Blood component utilisation".to_string(),
            department: "Blood Bank".to_string(),
            numerator: None,
            denominator: None,
            custom_values,
            percentage: Some(1000.0),
            benchmark_status: BenchmarkStatus::NoBenchmark,
            status_message: String::new(),
            remarks: Some("Unusual volume, see ward log".to_string()),
            entry_date: NaiveDate::from_ymd_opt(2025, 4, 3).expect("date"),
            entry_month: 4,
            submitted_at: Utc.with_ymd_and_hms(2025, 4, 3, 9, 30, 0).unwrap(),
        },
    ]
}

#[test]
fn writes_header_and_rows() {
    let mut buffer = Vec::new();
    write_submissions_csv(&mut buffer, &sample_submissions()).expect("write csv");
    let output = String::from_utf8(buffer).expect("utf8");
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("id,indicatorCode,indicatorName,department,entryDate"));
    assert!(lines[1].contains("QI-01"));
    assert!(lines[1].contains("93"));
    assert!(lines[2].contains("A=50 B=10"));
    // Full precision, no rounding or clamping on export.
    assert!(lines[2].contains("1000"));
    assert!(lines[2].contains("Unusual volume"));
}

#[test]
fn empty_list_writes_header_only() {
    let mut buffer = Vec::new();
    write_submissions_csv(&mut buffer, &[]).expect("write csv");
    let output = String::from_utf8(buffer).expect("utf8");
    assert_eq!(output.lines().count(), 1);
}

#[test]
fn absent_values_export_as_empty_cells() {
    let mut submissions = sample_submissions();
    submissions[0].percentage = None;
    submissions[0].benchmark_status = BenchmarkStatus::Undetermined;

    let mut buffer = Vec::new();
    write_submissions_csv(&mut buffer, &submissions[..1]).expect("write csv");
    let output = String::from_utf8(buffer).expect("utf8");
    let row = output.lines().nth(1).expect("data row");
    assert!(row.contains(",,UNDETERMINED,"));
}
