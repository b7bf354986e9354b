//! Calculation request and result contracts.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Raw numeric inputs for one evaluation, built fresh per request.
///
/// Standard formula types read `numerator`/`denominator`; `CUSTOM` mappings
/// read `variable_values`. Unused fields are simply ignored by validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numerator: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub denominator: Option<f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variable_values: BTreeMap<String, f64>,
}

impl CalculationRequest {
    /// Request for a standard (numerator/denominator) formula.
    #[must_use]
    pub fn standard(numerator: f64, denominator: f64) -> Self {
        Self {
            numerator: Some(numerator),
            denominator: Some(denominator),
            variable_values: BTreeMap::new(),
        }
    }

    /// Request for a `CUSTOM` formula.
    #[must_use]
    pub fn custom<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            numerator: None,
            denominator: None,
            variable_values: values.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Compliance verdict for a computed percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BenchmarkStatus {
    /// Result meets the configured threshold.
    Compliant,
    /// Result falls below the configured threshold.
    NonCompliant,
    /// The mapping defines no benchmark; the result is recorded as-is.
    NoBenchmark,
    /// No percentage was available to classify.
    Undetermined,
}

impl BenchmarkStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "COMPLIANT",
            Self::NonCompliant => "NON_COMPLIANT",
            Self::NoBenchmark => "NO_BENCHMARK",
            Self::Undetermined => "UNDETERMINED",
        }
    }
}

impl fmt::Display for BenchmarkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BenchmarkStatus {
    type Err = crate::ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "COMPLIANT" => Ok(Self::Compliant),
            "NON_COMPLIANT" => Ok(Self::NonCompliant),
            "NO_BENCHMARK" => Ok(Self::NoBenchmark),
            "UNDETERMINED" => Ok(Self::Undetermined),
            other => Err(crate::ModelError::UnknownBenchmarkStatus(other.to_string())),
        }
    }
}

/// Outcome of one evaluation: the percentage, its verdict, and a
/// display-ready explanation. Produced synchronously; never persisted on
/// its own, only inside a submission record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// Full-precision percentage. `None` only when the value fed to
    /// classification was undefined.
    pub calculated_percentage: Option<f64>,
    pub benchmark_status: BenchmarkStatus,
    pub message: String,
}
