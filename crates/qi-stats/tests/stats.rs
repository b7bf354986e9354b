use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeZone, Utc};

use qi_model::{BenchmarkStatus, Submission};
use qi_stats::{StatisticsFilter, monthly_series, summarize};

fn submission(
    id: &str,
    code: &str,
    department: &str,
    percentage: Option<f64>,
    year: i32,
    month: u32,
) -> Submission {
    Submission {
        id: id.to_string(),
        mapping_id: format!("map-{code}"),
        indicator_code: code.to_string(),
        indicator_name: format!("Indicator {code}"),
        department: department.to_string(),
        numerator: None,
        denominator: None,
        custom_values: BTreeMap::new(),
        percentage,
        benchmark_status: BenchmarkStatus::NoBenchmark,
        status_message: String::new(),
        remarks: None,
        entry_date: NaiveDate::from_ymd_opt(year, month, 10).expect("date"),
        entry_month: month,
        submitted_at: Utc.with_ymd_and_hms(year, month, 10, 12, 0, 0).unwrap(),
    }
}

fn sample_submissions() -> Vec<Submission> {
    vec![
        submission("s1", "QI-01", "Infection Control", Some(90.0), 2025, 1),
        submission("s2", "QI-01", "Infection Control", Some(94.0), 2025, 1),
        submission("s3", "QI-01", "Infection Control", Some(98.0), 2025, 2),
        submission("s4", "QI-12", "Blood Bank", Some(75.0), 2025, 1),
        submission("s5", "QI-12", "Blood Bank", None, 2025, 2),
        submission("s6", "QI-01", "Infection Control", Some(88.0), 2024, 12),
    ]
}

#[test]
fn summarize_groups_by_indicator() {
    let submissions = sample_submissions();
    let stats = summarize(&submissions, &StatisticsFilter::default());
    assert_eq!(stats.len(), 2);

    let qi01 = &stats[0];
    assert_eq!(qi01.indicator_code, "QI-01");
    assert_eq!(qi01.count, 4);
    assert_eq!(qi01.average_percentage, Some((90.0 + 94.0 + 98.0 + 88.0) / 4.0));

    let qi12 = &stats[1];
    assert_eq!(qi12.indicator_code, "QI-12");
    // The percentage-less submission is counted but excluded from the mean.
    assert_eq!(qi12.count, 2);
    assert_eq!(qi12.average_percentage, Some(75.0));
}

#[test]
fn filters_restrict_the_population() {
    let submissions = sample_submissions();

    let filter = StatisticsFilter {
        year: Some(2025),
        month: Some(1),
        ..StatisticsFilter::default()
    };
    let stats = summarize(&submissions, &filter);
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0].count, 2);
    assert_eq!(stats[0].average_percentage, Some(92.0));

    let filter = StatisticsFilter {
        department: Some("blood bank".to_string()),
        ..StatisticsFilter::default()
    };
    let stats = summarize(&submissions, &filter);
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].indicator_code, "QI-12");

    let filter = StatisticsFilter {
        mapping_id: Some("map-QI-01".to_string()),
        ..StatisticsFilter::default()
    };
    let stats = summarize(&submissions, &filter);
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].count, 4);
}

#[test]
fn empty_population_summarizes_to_nothing() {
    let stats = summarize(&[], &StatisticsFilter::default());
    assert!(stats.is_empty());

    let submissions = sample_submissions();
    let filter = StatisticsFilter {
        year: Some(2030),
        ..StatisticsFilter::default()
    };
    assert!(summarize(&submissions, &filter).is_empty());
}

#[test]
fn all_percentages_missing_yields_no_mean() {
    let submissions = vec![submission("s1", "QI-12", "Blood Bank", None, 2025, 3)];
    let stats = summarize(&submissions, &StatisticsFilter::default());
    assert_eq!(stats[0].count, 1);
    assert_eq!(stats[0].average_percentage, None);
}

#[test]
fn monthly_series_is_chronological() {
    let submissions = sample_submissions();
    let series = monthly_series(&submissions, "QI-01");
    assert_eq!(series.len(), 3);
    assert_eq!((series[0].year, series[0].month), (2024, 12));
    assert_eq!((series[1].year, series[1].month), (2025, 1));
    assert_eq!((series[2].year, series[2].month), (2025, 2));
    assert_eq!(series[1].count, 2);
    assert_eq!(series[1].average_percentage, Some(92.0));

    assert!(monthly_series(&submissions, "QI-77").is_empty());
}
