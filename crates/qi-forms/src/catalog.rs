//! Indicator mapping catalog.
//!
//! Mappings are administered outside this workspace and arrive as a JSON
//! document (an array of mapping records). The catalog loads that document
//! once and serves read-only lookups; nothing here ever mutates a mapping.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use qi_model::IndicatorMapping;

/// Read-only collection of indicator mappings.
#[derive(Debug, Clone, Default)]
pub struct MappingCatalog {
    mappings: Vec<IndicatorMapping>,
}

impl MappingCatalog {
    /// Build a catalog from already-deserialized mappings.
    #[must_use]
    pub fn new(mappings: Vec<IndicatorMapping>) -> Self {
        Self { mappings }
    }

    /// Load a catalog from a JSON file containing an array of mappings.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read mapping catalog: {}", path.display()))?;
        let mappings: Vec<IndicatorMapping> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse mapping catalog: {}", path.display()))?;
        debug!(count = mappings.len(), path = %path.display(), "loaded mapping catalog");
        Ok(Self { mappings })
    }

    /// Look up a mapping by record id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&IndicatorMapping> {
        self.mappings.iter().find(|m| m.id == id)
    }

    /// Look up a mapping by its user-facing indicator code.
    #[must_use]
    pub fn by_code(&self, code: &str) -> Option<&IndicatorMapping> {
        self.mappings
            .iter()
            .find(|m| m.indicator_code.eq_ignore_ascii_case(code))
    }

    /// All mappings, in catalog order.
    #[must_use]
    pub fn mappings(&self) -> &[IndicatorMapping] {
        &self.mappings
    }

    /// Mappings currently accepting submissions.
    pub fn active(&self) -> impl Iterator<Item = &IndicatorMapping> {
        self.mappings.iter().filter(|m| m.is_active)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}
