//! Data-entry services for the quality-indicator tracker.
//!
//! Wraps the calculation engine with the two caller-facing operations
//! (preview and submit), the remarks business rule, and file-backed
//! storage for the mapping catalog and submission records.

pub mod catalog;
pub mod error;
pub mod service;
pub mod store;

pub use catalog::MappingCatalog;
pub use error::{FormError, Result};
pub use service::{FormService, SubmitRequest};
pub use store::SubmissionStore;
