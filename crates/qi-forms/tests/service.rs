use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;

use qi_forms::{FormError, FormService, MappingCatalog, SubmissionStore, SubmitRequest};
use qi_model::{BenchmarkStatus, CalculationRequest, FormulaType, IndicatorMapping};

fn temp_store_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("qi_forms_store_{stamp}"));
    dir
}

fn cleanup_dir(dir: &PathBuf) {
    let _ = fs::remove_dir_all(dir);
}

fn sample_catalog() -> MappingCatalog {
    let mut vars = BTreeMap::new();
    vars.insert("A".to_string(), "Components used".to_string());
    vars.insert("B".to_string(), "Total products".to_string());
    MappingCatalog::new(vec![
        IndicatorMapping {
            id: "map-001".to_string(),
            indicator_code: "QI-01".to_string(),
            name: "Hand hygiene compliance".to_string(),
            formula_type: FormulaType::AOverB,
            numerator_field: "Compliant observations".to_string(),
            denominator_field: "Total observations".to_string(),
            custom_formula: None,
            variable_descriptions: None,
            patient_type: None,
            department: "Infection Control".to_string(),
            acceptable_benchmark: Some(95.0),
            non_compliant_benchmark: Some(90.0),
            is_active: true,
        },
        IndicatorMapping {
            id: "map-002".to_string(),
            indicator_code: "QI-12".to_string(),
            name: "Blood component utilisation".to_string(),
            formula_type: FormulaType::Custom,
            numerator_field: String::new(),
            denominator_field: String::new(),
            custom_formula: Some("A / B * 100".to_string()),
            variable_descriptions: Some(vars),
            patient_type: Some("IPD".to_string()),
            department: "Blood Bank".to_string(),
            acceptable_benchmark: None,
            non_compliant_benchmark: None,
            is_active: true,
        },
        IndicatorMapping {
            id: "map-003".to_string(),
            indicator_code: "QI-90".to_string(),
            name: "Retired indicator".to_string(),
            formula_type: FormulaType::Direct,
            numerator_field: "Percentage".to_string(),
            denominator_field: "Unused".to_string(),
            custom_formula: None,
            variable_descriptions: None,
            patient_type: None,
            department: "Quality".to_string(),
            acceptable_benchmark: None,
            non_compliant_benchmark: None,
            is_active: false,
        },
    ])
}

fn entry_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("date")
}

#[test]
fn preview_and_submit_agree() {
    let dir = temp_store_dir();
    let service = FormService::new(sample_catalog(), SubmissionStore::new(&dir));

    let inputs = CalculationRequest::standard(96.0, 100.0);
    let preview = service.preview("map-001", &inputs).expect("preview");
    assert_eq!(preview.calculated_percentage, Some(96.0));
    assert_eq!(preview.benchmark_status, BenchmarkStatus::Compliant);

    let submission = service
        .submit(&SubmitRequest {
            mapping_id: "map-001".to_string(),
            inputs,
            entry_date: entry_date(),
            remarks: None,
        })
        .expect("submit");
    assert_eq!(submission.percentage, preview.calculated_percentage);
    assert_eq!(submission.benchmark_status, preview.benchmark_status);
    assert_eq!(submission.status_message, preview.message);
    assert_eq!(submission.entry_month, 6);

    cleanup_dir(&dir);
}

#[test]
fn non_compliant_submission_requires_remarks() {
    let dir = temp_store_dir();
    let service = FormService::new(sample_catalog(), SubmissionStore::new(&dir));

    let request = SubmitRequest {
        mapping_id: "map-001".to_string(),
        inputs: CalculationRequest::standard(85.0, 100.0),
        entry_date: entry_date(),
        remarks: None,
    };
    assert!(matches!(
        service.submit(&request),
        Err(FormError::RemarksRequired)
    ));

    // Whitespace-only remarks do not satisfy the rule.
    let request = SubmitRequest {
        remarks: Some("   ".to_string()),
        ..request
    };
    assert!(matches!(
        service.submit(&request),
        Err(FormError::RemarksRequired)
    ));

    let request = SubmitRequest {
        remarks: Some("Staffing shortage during night shift".to_string()),
        ..request
    };
    let submission = service.submit(&request).expect("submit with remarks");
    assert_eq!(submission.benchmark_status, BenchmarkStatus::NonCompliant);
    assert_eq!(
        submission.remarks.as_deref(),
        Some("Staffing shortage during night shift")
    );

    cleanup_dir(&dir);
}

#[test]
fn custom_mapping_submission_round_trips() {
    let dir = temp_store_dir();
    let service = FormService::new(sample_catalog(), SubmissionStore::new(&dir));

    let submission = service
        .submit(&SubmitRequest {
            mapping_id: "map-002".to_string(),
            inputs: CalculationRequest::custom([("A", 47.0), ("B", 50.0)]),
            entry_date: entry_date(),
            remarks: None,
        })
        .expect("submit custom");
    assert_eq!(submission.percentage, Some(94.0));
    assert_eq!(submission.benchmark_status, BenchmarkStatus::NoBenchmark);

    let listed = service.list_submissions().expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], submission);

    cleanup_dir(&dir);
}

#[test]
fn inactive_mapping_rejects_submissions() {
    let dir = temp_store_dir();
    let service = FormService::new(sample_catalog(), SubmissionStore::new(&dir));

    let request = SubmitRequest {
        mapping_id: "map-003".to_string(),
        inputs: CalculationRequest::standard(50.0, 1.0),
        entry_date: entry_date(),
        remarks: None,
    };
    assert!(matches!(
        service.submit(&request),
        Err(FormError::MappingInactive(_))
    ));
    // Preview still works against an inactive mapping.
    assert!(service.preview("map-003", &request.inputs).is_ok());

    cleanup_dir(&dir);
}

#[test]
fn update_reevaluates_and_delete_removes() {
    let dir = temp_store_dir();
    let service = FormService::new(sample_catalog(), SubmissionStore::new(&dir));

    let submission = service
        .submit(&SubmitRequest {
            mapping_id: "map-001".to_string(),
            inputs: CalculationRequest::standard(96.0, 100.0),
            entry_date: entry_date(),
            remarks: None,
        })
        .expect("submit");

    // Lowering the numerator drops the result below the gate, so the
    // update must now carry remarks.
    let revised = SubmitRequest {
        mapping_id: "map-001".to_string(),
        inputs: CalculationRequest::standard(80.0, 100.0),
        entry_date: NaiveDate::from_ymd_opt(2025, 7, 1).expect("date"),
        remarks: None,
    };
    assert!(matches!(
        service.update_submission(&submission.id, &revised),
        Err(FormError::RemarksRequired)
    ));

    let revised = SubmitRequest {
        remarks: Some("Observation audit gap".to_string()),
        ..revised
    };
    let updated = service
        .update_submission(&submission.id, &revised)
        .expect("update");
    assert_eq!(updated.id, submission.id);
    assert_eq!(updated.percentage, Some(80.0));
    assert_eq!(updated.benchmark_status, BenchmarkStatus::NonCompliant);
    assert_eq!(updated.entry_month, 7);

    service.delete_submission(&submission.id).expect("delete");
    assert!(matches!(
        service.delete_submission(&submission.id),
        Err(FormError::SubmissionNotFound(_))
    ));
    assert!(service.list_submissions().expect("list").is_empty());

    cleanup_dir(&dir);
}

#[test]
fn unknown_mapping_is_reported() {
    let dir = temp_store_dir();
    let service = FormService::new(sample_catalog(), SubmissionStore::new(&dir));
    let inputs = CalculationRequest::standard(1.0, 2.0);
    assert!(matches!(
        service.preview("map-missing", &inputs),
        Err(FormError::MappingNotFound(_))
    ));
    cleanup_dir(&dir);
}
