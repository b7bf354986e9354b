//! Percentage evaluation per formula type.
//!
//! Pure and synchronous: no I/O, no state beyond the arguments. Results
//! keep full f64 precision; nothing here rounds or clamps. Out-of-range
//! percentages (1000% and beyond) are legitimate and pass through
//! unchanged.

use std::collections::BTreeMap;

use tracing::debug;

use qi_model::{CalculationRequest, CalculationResult, FormulaType, IndicatorMapping};

use crate::classify::classify;
use crate::error::{CalcError, Result};
use crate::expr::Expr;
use crate::validate::{ValidatedInput, validate};

/// A custom formula parsed and checked against its mapping's declared
/// variables. Compile once per mapping, evaluate per request; a compiled
/// formula can no longer fail structurally.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFormula {
    expr: Expr,
}

impl CompiledFormula {
    /// Parse the mapping's custom formula and verify every referenced
    /// variable is declared in `variable_descriptions`.
    pub fn compile(mapping: &IndicatorMapping) -> Result<Self> {
        let source = mapping.custom_formula.as_deref().ok_or_else(|| {
            CalcError::FormulaParse("mapping declares no custom formula".to_string())
        })?;
        let expr = Expr::parse(source)?;

        let declared = mapping.required_variables();
        let undeclared: Vec<&str> = expr
            .variables()
            .into_iter()
            .filter(|name| !declared.contains(name))
            .collect();
        if !undeclared.is_empty() {
            return Err(CalcError::FormulaParse(format!(
                "undeclared variable(s): {}",
                undeclared.join(", ")
            )));
        }
        Ok(Self { expr })
    }

    /// Evaluate against validated bindings.
    pub fn evaluate(&self, values: &BTreeMap<String, f64>) -> Result<f64> {
        self.expr.eval(values)
    }
}

/// Compute the percentage for a mapping from raw inputs.
///
/// Validates first, then applies the mapping's formula. The returned value
/// is always finite.
pub fn evaluate(mapping: &IndicatorMapping, request: &CalculationRequest) -> Result<f64> {
    let input = validate(mapping, request)?;
    let percentage = match (mapping.formula_type, input) {
        (FormulaType::AOverB, ValidatedInput::Standard { numerator, denominator }) => {
            (numerator / denominator) * 100.0
        }
        (FormulaType::BOverA, ValidatedInput::Standard { numerator, denominator }) => {
            (denominator / numerator) * 100.0
        }
        (FormulaType::Direct, ValidatedInput::Standard { numerator, .. }) => numerator,
        (FormulaType::Custom, ValidatedInput::Custom { values }) => {
            CompiledFormula::compile(mapping)?.evaluate(&values)?
        }
        // validate() always returns the variant matching the formula type.
        (formula_type, input) => {
            unreachable!("validated input {input:?} does not match formula type {formula_type}")
        }
    };
    if !percentage.is_finite() {
        return Err(CalcError::FormulaEvaluation(
            "computed percentage is not finite".to_string(),
        ));
    }
    debug!(
        indicator = %mapping.indicator_code,
        formula = %mapping.formula_type,
        percentage,
        "evaluated indicator formula"
    );
    Ok(percentage)
}

/// Evaluate and classify in one step.
///
/// This is the single entry point both the preview and submit paths share,
/// which is what guarantees a displayed preview and a persisted value can
/// never diverge.
pub fn evaluate_result(
    mapping: &IndicatorMapping,
    request: &CalculationRequest,
) -> Result<CalculationResult> {
    let percentage = evaluate(mapping, request)?;
    Ok(classify(
        Some(percentage),
        mapping.acceptable_benchmark,
        mapping.non_compliant_benchmark,
    ))
}
