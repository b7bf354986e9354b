//! Input validation.
//!
//! Rejects malformed input before evaluation; never coerces. Custom-formula
//! validation reports every offending variable at once so the caller can
//! show the user a complete list in a single round trip.

use std::collections::BTreeMap;

use qi_model::{CalculationRequest, FormulaType, IndicatorMapping};

use crate::error::{CalcError, InputField, Result};

/// Input that passed validation for a specific mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatedInput {
    /// Finite numerator/denominator pair; divisor already checked for
    /// ratio formulas.
    Standard { numerator: f64, denominator: f64 },
    /// Finite bindings covering every declared variable.
    Custom { values: BTreeMap<String, f64> },
}

/// Validate a raw request against a mapping's formula type.
pub fn validate(mapping: &IndicatorMapping, request: &CalculationRequest) -> Result<ValidatedInput> {
    match mapping.formula_type {
        FormulaType::AOverB | FormulaType::BOverA | FormulaType::Direct => {
            validate_standard(mapping.formula_type, request)
        }
        FormulaType::Custom => validate_custom(mapping, request),
    }
}

fn validate_standard(
    formula_type: FormulaType,
    request: &CalculationRequest,
) -> Result<ValidatedInput> {
    let numerator = require_finite(request.numerator, InputField::Numerator)?;
    let denominator = require_finite(request.denominator, InputField::Denominator)?;

    // The dividing input must not be zero. DIRECT never divides.
    match formula_type {
        FormulaType::AOverB if denominator == 0.0 => {
            return Err(CalcError::DivisionByZero {
                divisor: InputField::Denominator,
            });
        }
        FormulaType::BOverA if numerator == 0.0 => {
            return Err(CalcError::DivisionByZero {
                divisor: InputField::Numerator,
            });
        }
        _ => {}
    }

    Ok(ValidatedInput::Standard {
        numerator,
        denominator,
    })
}

fn validate_custom(
    mapping: &IndicatorMapping,
    request: &CalculationRequest,
) -> Result<ValidatedInput> {
    let mut offending = Vec::new();
    for name in mapping.required_variables() {
        match request.variable_values.get(name) {
            Some(value) if value.is_finite() => {}
            _ => offending.push(name.to_string()),
        }
    }
    if !offending.is_empty() {
        // required_variables() iterates sorted keys, so the list is sorted.
        return Err(CalcError::MissingVariable { names: offending });
    }
    Ok(ValidatedInput::Custom {
        values: request.variable_values.clone(),
    })
}

fn require_finite(value: Option<f64>, field: InputField) -> Result<f64> {
    match value {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(CalcError::InvalidInput { field }),
    }
}
