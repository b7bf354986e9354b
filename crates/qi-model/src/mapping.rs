//! Indicator mapping records.
//!
//! Mappings are created and edited by an administrative process outside
//! this workspace; everything here treats them as read-only.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::formula::FormulaType;

/// One quality-indicator definition: the formula, its input labels, and the
/// benchmark thresholds results are classified against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorMapping {
    /// Stable record id.
    pub id: String,
    /// Short indicator code shown to users, e.g. `QI-07`.
    pub indicator_code: String,
    /// Full indicator name.
    pub name: String,
    pub formula_type: FormulaType,
    /// Label for the numerator input (standard formula types only).
    pub numerator_field: String,
    /// Label for the denominator input (standard formula types only).
    pub denominator_field: String,
    /// Algebraic expression, present iff `formula_type` is `CUSTOM`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_formula: Option<String>,
    /// Variable name to description, present iff `CUSTOM`. The keys define
    /// exactly the required input variables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable_descriptions: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_type: Option<String>,
    pub department: String,
    /// Percentage at or above which the indicator is considered acceptable.
    pub acceptable_benchmark: Option<f64>,
    /// Percentage below which the result is non-compliant. When both
    /// thresholds are present this one is the compliance gate.
    pub non_compliant_benchmark: Option<f64>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl IndicatorMapping {
    /// Returns true when at least one benchmark threshold is configured.
    #[must_use]
    pub fn has_benchmark(&self) -> bool {
        self.acceptable_benchmark.is_some() || self.non_compliant_benchmark.is_some()
    }

    /// The variable names a `CUSTOM` mapping requires, in sorted order.
    /// Empty for standard formula types.
    #[must_use]
    pub fn required_variables(&self) -> Vec<&str> {
        self.variable_descriptions
            .as_ref()
            .map(|vars| vars.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}
