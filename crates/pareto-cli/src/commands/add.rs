use super::print_report;
use anyhow::{Context, Result};
use pareto::merge::{self, BenchmarkBatch, ModelBatch};
use pareto::Dataset;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub fn benchmarks(dataset: &Dataset, input_file: &Path, dry_run: bool) -> Result<()> {
    let batch: BenchmarkBatch = read_batch(input_file)?;
    announce_dry_run(dry_run);

    let report = merge::add_benchmarks(dataset, &batch, dry_run)?;
    print_report(&report, &operation_title("Add Benchmarks", dry_run));
    suggest_apply(dry_run, report.has_changes());

    Ok(())
}

pub fn models(dataset: &Dataset, input_file: &Path, dry_run: bool) -> Result<()> {
    let batch: ModelBatch = read_batch(input_file)?;
    announce_dry_run(dry_run);

    let report = merge::add_models(dataset, &batch, dry_run)?;
    print_report(&report, &operation_title("Add Models", dry_run));

    if !report.missing_benchmarks.is_empty() {
        println!("Some benchmarks don't exist yet. Add them first with add-benchmarks\n");
    }
    suggest_apply(dry_run, report.has_changes());

    // A batch without a usable target was rejected outright.
    if !report.errors.is_empty() {
        anyhow::bail!("model batch rejected: {}", report.errors.join("; "));
    }
    Ok(())
}

fn read_batch<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read batch file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse batch file {}", path.display()))
}

fn operation_title(operation: &str, dry_run: bool) -> String {
    if dry_run {
        format!("{operation} (DRY RUN)")
    } else {
        format!("{operation} (APPLIED)")
    }
}

fn announce_dry_run(dry_run: bool) {
    if dry_run {
        println!("\nDRY RUN MODE - no changes will be applied");
    }
}

fn suggest_apply(dry_run: bool, has_changes: bool) {
    if dry_run && has_changes {
        println!("Run again without --dry-run to apply these changes\n");
    }
}
