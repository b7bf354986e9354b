//! Benchmark classification.
//!
//! Maps a computed percentage and the mapping's thresholds to a verdict
//! and a display-ready message. Pure; the only inputs are the arguments.
//!
//! When both thresholds are configured, `non_compliant_benchmark` is the
//! authoritative compliance gate: a result at or above it is compliant.
//! `acceptable_benchmark` gates only when it is the sole threshold. The
//! source application compared against either threshold depending on the
//! screen; this module picks one rule and applies it everywhere.

use qi_model::{BenchmarkStatus, CalculationResult};

/// Classify a percentage against the configured benchmarks.
///
/// A `None` percentage yields [`BenchmarkStatus::Undetermined`] rather than
/// being coerced into one of the other statuses. Percentages are never
/// clamped; the two-decimal rendering in messages is display-only.
#[must_use]
pub fn classify(
    percentage: Option<f64>,
    acceptable_benchmark: Option<f64>,
    non_compliant_benchmark: Option<f64>,
) -> CalculationResult {
    let Some(value) = percentage else {
        return CalculationResult {
            calculated_percentage: None,
            benchmark_status: BenchmarkStatus::Undetermined,
            message: "No percentage could be determined for this entry".to_string(),
        };
    };

    let (threshold, threshold_name) = match (non_compliant_benchmark, acceptable_benchmark) {
        (Some(gate), _) => (gate, "non-compliant benchmark"),
        (None, Some(gate)) => (gate, "acceptable benchmark"),
        (None, None) => {
            return CalculationResult {
                calculated_percentage: Some(value),
                benchmark_status: BenchmarkStatus::NoBenchmark,
                message: format!(
                    "No benchmark is defined for this indicator; result {value:.2}% recorded as entered"
                ),
            };
        }
    };

    if value >= threshold {
        CalculationResult {
            calculated_percentage: Some(value),
            benchmark_status: BenchmarkStatus::Compliant,
            message: format!(
                "Result {value:.2}% meets the {threshold_name} of {threshold:.2}%"
            ),
        }
    } else {
        CalculationResult {
            calculated_percentage: Some(value),
            benchmark_status: BenchmarkStatus::NonCompliant,
            message: format!(
                "Result {value:.2}% is below the {threshold_name} of {threshold:.2}%"
            ),
        }
    }
}
