//! Error type for form operations.

use qi_calc::CalcError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("mapping not found: {0}")]
    MappingNotFound(String),

    #[error("mapping '{0}' is inactive and does not accept submissions")]
    MappingInactive(String),

    #[error("submission not found: {0}")]
    SubmissionNotFound(String),

    /// Non-compliant results must carry an explanation.
    #[error("remarks are required when the result is non-compliant")]
    RemarksRequired,

    #[error(transparent)]
    Calc(#[from] CalcError),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, FormError>;
