//! Preview and submit services.
//!
//! Both paths run the same evaluation (`qi_calc::evaluate_result`), so the
//! percentage a user previews and the one persisted on submit can never
//! diverge. Submit additionally enforces the remarks rule and writes the
//! record to the store.

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use qi_calc::evaluate_result;
use qi_model::{BenchmarkStatus, CalculationRequest, CalculationResult, Submission};

use crate::catalog::MappingCatalog;
use crate::error::{FormError, Result};
use crate::store::SubmissionStore;

/// Inputs for a submit or update call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub mapping_id: String,
    pub inputs: CalculationRequest,
    pub entry_date: NaiveDate,
    pub remarks: Option<String>,
}

/// Data-entry service over a mapping catalog and a submission store.
#[derive(Debug)]
pub struct FormService {
    catalog: MappingCatalog,
    store: SubmissionStore,
}

impl FormService {
    #[must_use]
    pub fn new(catalog: MappingCatalog, store: SubmissionStore) -> Self {
        Self { catalog, store }
    }

    #[must_use]
    pub fn catalog(&self) -> &MappingCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn store(&self) -> &SubmissionStore {
        &self.store
    }

    /// Evaluate without persisting anything.
    pub fn preview(
        &self,
        mapping_id: &str,
        inputs: &CalculationRequest,
    ) -> Result<CalculationResult> {
        let mapping = self
            .catalog
            .get(mapping_id)
            .ok_or_else(|| FormError::MappingNotFound(mapping_id.to_string()))?;
        Ok(evaluate_result(mapping, inputs)?)
    }

    /// Evaluate, enforce the remarks rule, and persist a new submission.
    pub fn submit(&self, request: &SubmitRequest) -> Result<Submission> {
        let mapping = self
            .catalog
            .get(&request.mapping_id)
            .ok_or_else(|| FormError::MappingNotFound(request.mapping_id.clone()))?;
        if !mapping.is_active {
            return Err(FormError::MappingInactive(mapping.indicator_code.clone()));
        }

        let result = evaluate_result(mapping, &request.inputs)?;
        check_remarks(&result, request.remarks.as_deref())?;

        let submitted_at = Utc::now();
        let mut submission = Submission {
            id: new_submission_id(),
            mapping_id: mapping.id.clone(),
            indicator_code: mapping.indicator_code.clone(),
            indicator_name: mapping.name.clone(),
            department: mapping.department.clone(),
            numerator: request.inputs.numerator,
            denominator: request.inputs.denominator,
            custom_values: request.inputs.variable_values.clone(),
            percentage: None,
            benchmark_status: BenchmarkStatus::Undetermined,
            status_message: String::new(),
            remarks: normalized_remarks(request.remarks.as_deref()),
            entry_date: request.entry_date,
            entry_month: request.entry_date.month(),
            submitted_at,
        };
        submission.apply_result(&result);
        self.store.save(&submission)?;
        info!(
            id = %submission.id,
            indicator = %submission.indicator_code,
            status = %submission.benchmark_status,
            "recorded submission"
        );
        Ok(submission)
    }

    /// Re-evaluate an existing submission with revised inputs and persist
    /// the updated record. The remarks rule applies to the new result.
    pub fn update_submission(&self, id: &str, request: &SubmitRequest) -> Result<Submission> {
        let mut submission = self
            .store
            .load(id)?
            .ok_or_else(|| FormError::SubmissionNotFound(id.to_string()))?;
        let mapping = self
            .catalog
            .get(&request.mapping_id)
            .ok_or_else(|| FormError::MappingNotFound(request.mapping_id.clone()))?;

        let result = evaluate_result(mapping, &request.inputs)?;
        check_remarks(&result, request.remarks.as_deref())?;

        submission.mapping_id = mapping.id.clone();
        submission.indicator_code = mapping.indicator_code.clone();
        submission.indicator_name = mapping.name.clone();
        submission.department = mapping.department.clone();
        submission.numerator = request.inputs.numerator;
        submission.denominator = request.inputs.denominator;
        submission.custom_values = request.inputs.variable_values.clone();
        submission.remarks = normalized_remarks(request.remarks.as_deref());
        submission.entry_date = request.entry_date;
        submission.entry_month = request.entry_date.month();
        submission.apply_result(&result);
        self.store.save(&submission)?;
        info!(id = %submission.id, "updated submission");
        Ok(submission)
    }

    /// Delete a submission by id.
    pub fn delete_submission(&self, id: &str) -> Result<()> {
        if !self.store.delete(id)? {
            return Err(FormError::SubmissionNotFound(id.to_string()));
        }
        Ok(())
    }

    /// All stored submissions, newest first.
    pub fn list_submissions(&self) -> Result<Vec<Submission>> {
        Ok(self.store.list()?)
    }
}

/// Non-compliant results must be accompanied by non-empty remarks.
fn check_remarks(result: &CalculationResult, remarks: Option<&str>) -> Result<()> {
    if result.benchmark_status == BenchmarkStatus::NonCompliant
        && remarks.is_none_or(|r| r.trim().is_empty())
    {
        return Err(FormError::RemarksRequired);
    }
    Ok(())
}

fn normalized_remarks(remarks: Option<&str>) -> Option<String> {
    remarks
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(ToString::to_string)
}

/// Timestamp-based id, unique per process invocation.
fn new_submission_id() -> String {
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    format!("sub-{stamp}")
}
