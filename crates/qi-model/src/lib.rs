//! Data model for the quality-indicator tracker.
//!
//! Contracts shared by the calculation engine, the form services, and the
//! CLI: indicator mappings, calculation requests/results, and submission
//! records. All wire types serialize with camelCase field names to match
//! the externally-owned mapping and submission documents.

pub mod calculation;
pub mod error;
pub mod formula;
pub mod mapping;
pub mod submission;

pub use calculation::{BenchmarkStatus, CalculationRequest, CalculationResult};
pub use error::{ModelError, Result};
pub use formula::FormulaType;
pub use mapping::IndicatorMapping;
pub use submission::Submission;
