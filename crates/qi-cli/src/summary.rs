//! Terminal output helpers.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};

use qi_model::{CalculationResult, IndicatorMapping, Submission};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// Two-decimal rendering for display. Stored values keep full precision.
pub fn format_optional_percentage(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}%"),
        None => "-".to_string(),
    }
}

pub fn print_mappings(mappings: &[IndicatorMapping]) {
    let mut table = Table::new();
    table.set_header(vec![
        "Code",
        "Name",
        "Formula",
        "Department",
        "Acceptable",
        "Non-compliant",
        "Active",
    ]);
    apply_table_style(&mut table);
    for mapping in mappings {
        table.add_row(vec![
            mapping.indicator_code.clone(),
            mapping.name.clone(),
            mapping.formula_type.to_string(),
            mapping.department.clone(),
            format_optional_percentage(mapping.acceptable_benchmark),
            format_optional_percentage(mapping.non_compliant_benchmark),
            if mapping.is_active { "yes" } else { "no" }.to_string(),
        ]);
    }
    println!("{table}");
}

pub fn print_submissions(submissions: &[Submission]) {
    let mut table = Table::new();
    table.set_header(vec![
        "Id",
        "Indicator",
        "Entry date",
        "Percentage",
        "Status",
        "Remarks",
    ]);
    apply_table_style(&mut table);
    for submission in submissions {
        table.add_row(vec![
            submission.id.clone(),
            submission.indicator_code.clone(),
            submission.entry_date.to_string(),
            format_optional_percentage(submission.percentage),
            submission.benchmark_status.to_string(),
            submission.remarks.clone().unwrap_or_default(),
        ]);
    }
    println!("{table}");
}

pub fn print_result(mapping: &IndicatorMapping, result: &CalculationResult) {
    println!("{} - {}", mapping.indicator_code, mapping.name);
    println!(
        "Result: {} ({})",
        format_optional_percentage(result.calculated_percentage),
        result.benchmark_status
    );
    println!("{}", result.message);
}
