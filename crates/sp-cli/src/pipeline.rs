//! Publishing pipeline with explicit per-dataset stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Load**: Discover and read raw extract CSV files
//! 2. **Resolve**: Join reference catalogs into one metadata record per dataset
//! 3. **Combine**: Concatenate same-dataset extracts in precedence order
//! 4. **Tidy**: Reshape the combined wide table into the canonical layout
//! 5. **Render**: Produce the ordered metadata field/value rows
//! 6. **Emit**: Write the per-dataset Data and Metadata CSVs
//!
//! Catalog load failures abort the run. Every later failure is scoped to one
//! dataset: it is recorded with its stage and the remaining datasets proceed.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use sp_catalog::{Catalogs, load_catalogs};
use sp_model::ExtractTable;
use sp_report::{RenderOptions, render, write_data_csv, write_metadata_csv};
use sp_resolve::resolve;
use sp_transform::{CombinationPlan, combine, plan_groups, tidy};

use crate::types::{DatasetSummary, RunResult, Stage, StageFailure};

/// Everything one publishing run needs to know.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub catalog_dir: std::path::PathBuf,
    pub extracts_dir: std::path::PathBuf,
    pub commissioned_dir: Option<std::path::PathBuf>,
    pub commission_spec: std::path::PathBuf,
    pub output_dir: std::path::PathBuf,
    pub release_date: Option<String>,
    pub dry_run: bool,
}

/// Run the full pipeline over every discovered extract.
///
/// # Errors
///
/// Returns an error when the reference catalogs cannot be loaded or the run
/// report cannot be written. Dataset-scoped failures do not error; they are
/// collected in the result.
pub fn run(config: &RunConfig) -> Result<RunResult> {
    let catalogs = load_catalogs(&config.catalog_dir, &config.commission_spec)
        .context("loading reference catalogs")?;

    let extract_ids = list_extract_stems(&config.extracts_dir)
        .with_context(|| format!("listing extracts in {}", config.extracts_dir.display()))?;
    let commissioned_ids = match &config.commissioned_dir {
        Some(dir) => list_extract_stems(dir)
            .with_context(|| format!("listing commissioned extracts in {}", dir.display()))?,
        None => Vec::new(),
    };

    let plans = plan_groups(&extract_ids, &commissioned_ids);
    info!(
        extract_count = extract_ids.len(),
        commissioned_count = commissioned_ids.len(),
        dataset_count = plans.len(),
        "publishing run started"
    );

    let options = RenderOptions {
        release_date: config.release_date.clone(),
    };

    let mut datasets = Vec::new();
    let mut failures = Vec::new();
    for plan in &plans {
        let span = info_span!("dataset", id = %plan.dataset_id);
        let _guard = span.enter();
        match process_plan(config, &catalogs, plan, &options) {
            Ok(summary) => datasets.push(summary),
            Err(failure) => {
                warn!(
                    stage = failure.stage.as_str(),
                    reason = %failure.reason,
                    "dataset excluded from run"
                );
                failures.push(failure);
            }
        }
    }

    let mut result = RunResult {
        output_dir: config.output_dir.clone(),
        datasets,
        failures,
        report_path: None,
        dry_run: config.dry_run,
    };
    if !config.dry_run {
        result.report_path = Some(write_run_report(&config.output_dir, &result)?);
    }

    info!(
        succeeded = result.datasets.len(),
        failed = result.failures.len(),
        "publishing run finished"
    );
    Ok(result)
}

/// Take one dataset through every stage. Any stage error excludes only this
/// dataset.
fn process_plan(
    config: &RunConfig,
    catalogs: &Catalogs,
    plan: &CombinationPlan,
    options: &RenderOptions,
) -> std::result::Result<DatasetSummary, StageFailure> {
    let fail = |stage: Stage| {
        let dataset_id = plan.dataset_id.clone();
        move |error: &dyn std::fmt::Display| StageFailure {
            dataset_id,
            stage,
            reason: error.to_string(),
        }
    };

    let member_ids = plan.member_ids();
    let mut members = Vec::with_capacity(member_ids.len());
    for member_id in &member_ids {
        let table = read_member(config, plan, member_id)
            .map_err(|error| fail(Stage::Load)(&error))?;
        members.push(table);
    }

    let provenance: Vec<String> = if member_ids.len() > 1 {
        member_ids
    } else {
        Vec::new()
    };
    let record = resolve(&plan.dataset_id, &provenance, catalogs)
        .map_err(|error| fail(Stage::Resolve)(&error))?;

    let combined =
        combine(plan, members).map_err(|error| fail(Stage::Combine)(&error))?;

    let table = tidy(&combined.table, &record, &catalogs.geog_titles)
        .map_err(|error| fail(Stage::Tidy)(&error))?;

    let rows = render(&record, options);

    let mut summary = DatasetSummary {
        dataset_id: plan.dataset_id.clone(),
        title: record.title.clone(),
        records: table.record_count(),
        combined_from: combined.provenance,
        data_csv: None,
        metadata_csv: None,
    };
    if !config.dry_run {
        summary.data_csv = Some(
            write_data_csv(&config.output_dir, &plan.dataset_id, &table)
                .map_err(|error| fail(Stage::Emit)(&error))?,
        );
        summary.metadata_csv = Some(
            write_metadata_csv(&config.output_dir, &plan.dataset_id, &rows)
                .map_err(|error| fail(Stage::Emit)(&error))?,
        );
    }
    Ok(summary)
}

/// List the CSV file stems of a directory, sorted for deterministic runs.
pub fn list_extract_stems(dir: &Path) -> Result<Vec<String>> {
    let mut stems = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry
            .with_context(|| format!("reading entry in {}", dir.display()))?
            .path();
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if !is_csv {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
            stems.push(stem.to_string());
        }
    }
    stems.sort();
    Ok(stems)
}

/// Read one raw extract CSV as an all-text table.
pub fn read_extract(dir: &Path, stem: &str) -> Result<ExtractTable> {
    let path = dir.join(format!("{stem}.csv"));
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(&path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("reading headers of {}", path.display()))?
        .iter()
        .map(|header| header.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut table = ExtractTable::new(stem, headers);
    for row in reader.records() {
        let row = row.with_context(|| format!("reading row in {}", path.display()))?;
        table.rows.push(row.iter().map(str::to_string).collect());
    }
    Ok(table)
}

/// Commissioned members live in the commissioned directory; area members in
/// the extracts directory.
fn read_member(config: &RunConfig, plan: &CombinationPlan, member_id: &str) -> Result<ExtractTable> {
    let is_commissioned = plan.commissioned_member.as_deref() == Some(member_id);
    let dir = if is_commissioned {
        config
            .commissioned_dir
            .as_deref()
            .unwrap_or(&config.extracts_dir)
    } else {
        &config.extracts_dir
    };
    read_extract(dir, member_id)
}

fn write_run_report(output_dir: &Path, result: &RunResult) -> Result<std::path::PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;
    let path = output_dir.join("run_report.json");
    let json = serde_json::to_string_pretty(result).context("serializing run report")?;
    fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}
