//! Submission statistics.
//!
//! Pure aggregation over submission slices: per-indicator summaries and
//! chronological monthly series. Submissions without a computed percentage
//! are counted but excluded from means.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use qi_model::Submission;

/// Optional constraints applied before aggregation. Unset fields match
/// everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatisticsFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub department: Option<String>,
    pub mapping_id: Option<String>,
}

impl StatisticsFilter {
    fn matches(&self, submission: &Submission) -> bool {
        if let Some(year) = self.year
            && submission.entry_year() != year
        {
            return false;
        }
        if let Some(month) = self.month
            && submission.entry_month != month
        {
            return false;
        }
        if let Some(department) = &self.department
            && !submission.department.eq_ignore_ascii_case(department)
        {
            return false;
        }
        if let Some(mapping_id) = &self.mapping_id
            && submission.mapping_id != *mapping_id
        {
            return false;
        }
        true
    }
}

/// Per-indicator summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorStatistics {
    pub indicator_code: String,
    pub indicator_name: String,
    pub department: String,
    /// Number of matching submissions, including ones without a percentage.
    pub count: usize,
    /// Mean of the available percentages; `None` when none were available.
    pub average_percentage: Option<f64>,
}

/// One (year, month) bucket for a single indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    pub year: i32,
    pub month: u32,
    pub indicator_code: String,
    pub count: usize,
    pub average_percentage: Option<f64>,
}

/// Summarize submissions per indicator, sorted by indicator code.
#[must_use]
pub fn summarize(submissions: &[Submission], filter: &StatisticsFilter) -> Vec<IndicatorStatistics> {
    let mut groups: BTreeMap<&str, Vec<&Submission>> = BTreeMap::new();
    for submission in submissions.iter().filter(|s| filter.matches(s)) {
        groups
            .entry(submission.indicator_code.as_str())
            .or_default()
            .push(submission);
    }

    groups
        .into_iter()
        .map(|(code, group)| {
            let first = group[0];
            IndicatorStatistics {
                indicator_code: code.to_string(),
                indicator_name: first.indicator_name.clone(),
                department: first.department.clone(),
                count: group.len(),
                average_percentage: mean(group.iter().filter_map(|s| s.percentage)),
            }
        })
        .collect()
}

/// Monthly series for one indicator, in chronological order.
#[must_use]
pub fn monthly_series(submissions: &[Submission], indicator_code: &str) -> Vec<MonthlyPoint> {
    let mut buckets: BTreeMap<(i32, u32), Vec<&Submission>> = BTreeMap::new();
    for submission in submissions
        .iter()
        .filter(|s| s.indicator_code.eq_ignore_ascii_case(indicator_code))
    {
        buckets
            .entry((submission.entry_year(), submission.entry_month))
            .or_default()
            .push(submission);
    }

    buckets
        .into_iter()
        .map(|((year, month), group)| MonthlyPoint {
            year,
            month,
            indicator_code: indicator_code.to_string(),
            count: group.len(),
            average_percentage: mean(group.iter().filter_map(|s| s.percentage)),
        })
        .collect()
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
