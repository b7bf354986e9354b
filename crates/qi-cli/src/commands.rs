use std::collections::BTreeMap;
use std::io;

use anyhow::{Result, anyhow};
use comfy_table::Table;
use tracing::info_span;

use qi_forms::{FormService, MappingCatalog, SubmissionStore, SubmitRequest};
use qi_model::{CalculationRequest, IndicatorMapping};
use qi_stats::{StatisticsFilter, monthly_series, summarize};

use crate::cli::{
    CatalogArgs, ExportArgs, InputArgs, PreviewArgs, StatsArgs, StoreArgs, SubmitArgs,
};
use crate::summary::{
    apply_table_style, format_optional_percentage, print_mappings, print_result, print_submissions,
};

pub fn run_mappings(args: &CatalogArgs) -> Result<()> {
    let catalog = MappingCatalog::load(&args.catalog)?;
    print_mappings(catalog.mappings());
    Ok(())
}

pub fn run_preview(args: &PreviewArgs) -> Result<()> {
    let catalog = MappingCatalog::load(&args.catalog)?;
    let mapping = resolve_mapping(&catalog, &args.mapping)?;
    let span = info_span!("preview", indicator = %mapping.indicator_code);
    let _guard = span.enter();

    // Preview persists nothing; the store the service carries is never used.
    let service = FormService::new(catalog.clone(), SubmissionStore::new(std::env::temp_dir()));
    let result = service.preview(&mapping.id, &calculation_request(&args.inputs))?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(mapping, &result);
    }
    Ok(())
}

pub fn run_submit(args: &SubmitArgs) -> Result<()> {
    let catalog = MappingCatalog::load(&args.catalog)?;
    let mapping = resolve_mapping(&catalog, &args.mapping)?;
    let span = info_span!("submit", indicator = %mapping.indicator_code);
    let _guard = span.enter();

    let request = SubmitRequest {
        mapping_id: mapping.id.clone(),
        inputs: calculation_request(&args.inputs),
        entry_date: args.entry_date,
        remarks: args.remarks.clone(),
    };
    let service = FormService::new(catalog.clone(), SubmissionStore::new(&args.store));
    let submission = service.submit(&request)?;

    println!(
        "Recorded {} for {} on {}: {} ({})",
        submission.id,
        submission.indicator_code,
        submission.entry_date,
        format_optional_percentage(submission.percentage),
        submission.benchmark_status
    );
    println!("{}", submission.status_message);
    Ok(())
}

pub fn run_list(args: &StoreArgs) -> Result<()> {
    let store = SubmissionStore::new(&args.store);
    let submissions = store.list()?;
    if submissions.is_empty() {
        println!("No submissions recorded.");
        return Ok(());
    }
    print_submissions(&submissions);
    Ok(())
}

pub fn run_stats(args: &StatsArgs) -> Result<()> {
    let store = SubmissionStore::new(&args.store);
    let submissions = store.list()?;

    if let Some(indicator) = &args.monthly {
        let series = monthly_series(&submissions, indicator);
        if series.is_empty() {
            println!("No submissions for indicator {indicator}.");
            return Ok(());
        }
        let mut table = Table::new();
        table.set_header(vec!["Year", "Month", "Entries", "Average %"]);
        apply_table_style(&mut table);
        for point in series {
            table.add_row(vec![
                point.year.to_string(),
                point.month.to_string(),
                point.count.to_string(),
                format_optional_percentage(point.average_percentage),
            ]);
        }
        println!("{table}");
        return Ok(());
    }

    let filter = StatisticsFilter {
        year: args.year,
        month: args.month,
        department: args.department.clone(),
        mapping_id: None,
    };
    let stats = summarize(&submissions, &filter);
    if stats.is_empty() {
        println!("No submissions match the given filters.");
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec![
        "Indicator",
        "Name",
        "Department",
        "Entries",
        "Average %",
    ]);
    apply_table_style(&mut table);
    for entry in stats {
        table.add_row(vec![
            entry.indicator_code,
            entry.indicator_name,
            entry.department,
            entry.count.to_string(),
            format_optional_percentage(entry.average_percentage),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_export(args: &ExportArgs) -> Result<()> {
    let store = SubmissionStore::new(&args.store);
    let submissions = store.list()?;
    match &args.output {
        Some(path) => {
            qi_report::export_submissions(path, &submissions)?;
            println!("Exported {} submissions to {}", submissions.len(), path.display());
        }
        None => {
            qi_report::write_submissions_csv(io::stdout().lock(), &submissions)?;
        }
    }
    Ok(())
}

fn resolve_mapping<'a>(catalog: &'a MappingCatalog, key: &str) -> Result<&'a IndicatorMapping> {
    catalog
        .get(key)
        .or_else(|| catalog.by_code(key))
        .ok_or_else(|| anyhow!("no mapping with id or indicator code '{key}'"))
}

fn calculation_request(inputs: &InputArgs) -> CalculationRequest {
    let variable_values: BTreeMap<String, f64> = inputs.vars.iter().cloned().collect();
    CalculationRequest {
        numerator: inputs.numerator,
        denominator: inputs.denominator,
        variable_values,
    }
}
