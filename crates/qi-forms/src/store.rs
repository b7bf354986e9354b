//! Submission storage.
//!
//! File-system store: one JSON document per submission under a base
//! directory, named `{id}.json`. The directory is created lazily on the
//! first save.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use qi_model::Submission;

/// Directory-backed store for submission records.
#[derive(Debug, Clone)]
pub struct SubmissionStore {
    base_dir: PathBuf,
}

impl SubmissionStore {
    /// Create a store rooted at the given directory.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// The directory submissions are stored under.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Persist a submission, overwriting any previous version.
    pub fn save(&self, submission: &Submission) -> Result<()> {
        fs::create_dir_all(&self.base_dir).with_context(|| {
            format!(
                "failed to create submission directory: {}",
                self.base_dir.display()
            )
        })?;
        let path = self.submission_path(&submission.id);
        let json = serde_json::to_string_pretty(submission)
            .context("failed to serialize submission")?;
        fs::write(&path, json)
            .with_context(|| format!("failed to write submission: {}", path.display()))?;
        debug!(id = %submission.id, path = %path.display(), "saved submission");
        Ok(())
    }

    /// Load one submission by id. Returns `None` when the record does not
    /// exist.
    pub fn load(&self, id: &str) -> Result<Option<Submission>> {
        let path = self.submission_path(id);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read submission: {}", path.display()))?;
        let submission = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse submission: {}", path.display()))?;
        Ok(Some(submission))
    }

    /// All stored submissions, newest first.
    pub fn list(&self) -> Result<Vec<Submission>> {
        let mut submissions = Vec::new();
        if !self.base_dir.exists() {
            return Ok(submissions);
        }
        let entries = fs::read_dir(&self.base_dir).with_context(|| {
            format!(
                "failed to list submission directory: {}",
                self.base_dir.display()
            )
        })?;
        for entry in entries {
            let entry = entry.context("failed to read directory entry")?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read submission: {}", path.display()))?;
            let submission: Submission = serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse submission: {}", path.display()))?;
            submissions.push(submission);
        }
        submissions.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(submissions)
    }

    /// Remove a submission. Returns true when a record was deleted.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let path = self.submission_path(id);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)
            .with_context(|| format!("failed to delete submission: {}", path.display()))?;
        debug!(id, "deleted submission");
        Ok(true)
    }

    fn submission_path(&self, id: &str) -> PathBuf {
        self.base_dir.join(format!("{id}.json"))
    }
}
