//! Error types for calculation.
//!
//! Every variant is a deterministic function of bad input: none of these
//! are retryable, and none are ever silently defaulted. Callers translate
//! them into user-facing messages.

use std::fmt;

use thiserror::Error;

/// Which standard input an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Numerator,
    Denominator,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numerator => f.write_str("numerator"),
            Self::Denominator => f.write_str("denominator"),
        }
    }
}

/// Errors from input validation and formula evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// A standard input is missing or not a finite number.
    #[error("invalid input: {field} is missing or not a finite number")]
    InvalidInput { field: InputField },

    /// The dividing input of a ratio formula is exactly zero.
    #[error("division by zero: {divisor} must not be zero")]
    DivisionByZero { divisor: InputField },

    /// One or more required custom-formula variables are absent or not
    /// finite. Carries ALL offending names so the caller can present a
    /// complete error list in one round trip.
    #[error("missing or invalid variables: {}", names.join(", "))]
    MissingVariable { names: Vec<String> },

    /// The custom expression is structurally malformed.
    #[error("formula parse error: {0}")]
    FormulaParse(String),

    /// The custom expression evaluated to division by zero or a
    /// non-finite value.
    #[error("formula evaluation error: {0}")]
    FormulaEvaluation(String),
}

pub type Result<T> = std::result::Result<T, CalcError>;
