//! Formula type enumeration.
//!
//! Every indicator mapping carries exactly one formula type. The set is
//! closed: evaluation matches exhaustively over these four variants.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How raw inputs are turned into a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormulaType {
    /// `(numerator / denominator) * 100`.
    AOverB,
    /// `(denominator / numerator) * 100` - the roles are inverted
    /// relative to the field labels.
    BOverA,
    /// The numerator is already a percentage; passed through unchanged.
    Direct,
    /// User-authored algebraic expression over named variables.
    Custom,
}

impl FormulaType {
    /// Returns true when the formula divides one standard input by the other.
    #[must_use]
    pub fn is_ratio(&self) -> bool {
        matches!(self, Self::AOverB | Self::BOverA)
    }

    /// Returns true when inputs arrive as named variables instead of the
    /// standard numerator/denominator pair.
    #[must_use]
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom)
    }

    /// The wire-format name, as stored in mapping records.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AOverB => "A_OVER_B",
            Self::BOverA => "B_OVER_A",
            Self::Direct => "DIRECT",
            Self::Custom => "CUSTOM",
        }
    }
}

impl fmt::Display for FormulaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormulaType {
    type Err = crate::ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A_OVER_B" => Ok(Self::AOverB),
            "B_OVER_A" => Ok(Self::BOverA),
            "DIRECT" => Ok(Self::Direct),
            "CUSTOM" => Ok(Self::Custom),
            other => Err(crate::ModelError::UnknownFormulaType(other.to_string())),
        }
    }
}
