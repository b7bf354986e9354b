//! Persisted submission records.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::calculation::{BenchmarkStatus, CalculationResult};

/// One data-entry record: the raw inputs a user submitted for an indicator
/// on a given date, paired with the result computed at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    /// Id of the mapping this entry was made against.
    pub mapping_id: String,
    pub indicator_code: String,
    pub indicator_name: String,
    pub department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numerator: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub denominator: Option<f64>,
    /// Named inputs for `CUSTOM` formulas.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_values: BTreeMap<String, f64>,
    /// Percentage computed at submission time, full precision.
    pub percentage: Option<f64>,
    pub benchmark_status: BenchmarkStatus,
    /// Classification message as shown to the user when they submitted.
    pub status_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    pub entry_date: NaiveDate,
    /// Month of `entry_date`, 1-12. Denormalized for statistics grouping.
    pub entry_month: u32,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    /// Copies the computed fields of a calculation result into this record.
    pub fn apply_result(&mut self, result: &CalculationResult) {
        self.percentage = result.calculated_percentage;
        self.benchmark_status = result.benchmark_status;
        self.status_message = result.message.clone();
    }

    /// Year of the entry date.
    #[must_use]
    pub fn entry_year(&self) -> i32 {
        self.entry_date.year()
    }
}
