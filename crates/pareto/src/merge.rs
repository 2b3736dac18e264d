//! Batch merge operations.
//!
//! Both entry points load a fresh snapshot, classify every proposed record as
//! added / updated / skipped / error, and rewrite the owning file after each
//! accepted change. Dry-run performs the identical computation and skips
//! every write call, so the report is the same in both modes.

use crate::dataset::{Dataset, BENCHMARKS_DIR, MODELS_DIR};
use crate::errors::DatasetError;
use crate::record::{BenchmarkRecord, ModelRecord};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Category used when a proposed benchmark does not carry one.
pub const DEFAULT_CATEGORY: &str = "knowledge";

/// Caller-supplied benchmark batch: `{"benchmarks": {id: record, ...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkBatch {
    #[serde(default)]
    pub benchmarks: BTreeMap<String, BenchmarkRecord>,
}

/// Caller-supplied model batch. At least one of `provider` / `target_file`
/// is required; an explicit `target_file` wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelBatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    /// Dataset-relative path, e.g. "models/qwen/qwen3.json"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_file: Option<String>,

    #[serde(default)]
    pub models: Vec<ModelRecord>,
}

/// Accumulated outcome of one batch. Every record lands in exactly one of
/// the classification lists; `missing_benchmarks` is advisory on top.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    pub added: Vec<String>,
    pub updated: Vec<String>,
    pub skipped: Vec<String>,
    pub errors: Vec<String>,
    /// "model-id: benchmark-id" entries for references the benchmark index
    /// does not know. Never blocks a merge.
    pub missing_benchmarks: Vec<String>,
}

impl MergeReport {
    /// Whether applying (or re-applying) this batch would touch any file.
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.updated.is_empty()
    }
}

/// Merge a benchmark batch into the category files.
///
/// Per key: an existing benchmark is compared field-for-field and replaced in
/// the file that currently holds it (keys never migrate between category
/// files); a new benchmark goes to the file its `category` resolves to. A new
/// key whose category file does not exist is reported as an error and the
/// rest of the batch proceeds.
pub fn add_benchmarks(
    dataset: &Dataset,
    batch: &BenchmarkBatch,
    dry_run: bool,
) -> Result<MergeReport, DatasetError> {
    let mut report = MergeReport::default();
    let mut snapshot = dataset.load()?;

    for (id, record) in &batch.benchmarks {
        let owner = snapshot.benchmark_file_for(id).map(str::to_string);
        match owner {
            Some(rel) => {
                let Some(file) = snapshot.benchmark_files.get_mut(&rel) else {
                    continue;
                };
                if file.benchmarks.get(id) == Some(record) {
                    report.skipped.push(format!("{id} (identical)"));
                } else {
                    report.updated.push(format!("{id} (data differs)"));
                    file.benchmarks.insert(id.clone(), record.clone());
                    if !dry_run {
                        dataset.write_json(&rel, &*file)?;
                    }
                }
            }
            None => {
                let category = record.category.as_deref().unwrap_or(DEFAULT_CATEGORY);
                let rel = format!("{BENCHMARKS_DIR}/{category}.json");
                match snapshot.benchmark_files.get_mut(&rel) {
                    Some(file) => {
                        report.added.push(id.clone());
                        file.benchmarks.insert(id.clone(), record.clone());
                        if !dry_run {
                            dataset.write_json(&rel, &*file)?;
                        }
                    }
                    None => {
                        report
                            .errors
                            .push(format!("category file not found: {category}.json"));
                    }
                }
            }
        }
    }

    tracing::info!(
        added = report.added.len(),
        updated = report.updated.len(),
        skipped = report.skipped.len(),
        errors = report.errors.len(),
        dry_run,
        "benchmark batch merged"
    );
    Ok(report)
}

/// Merge a model batch into its resolved target file.
///
/// A batch without a resolvable, existing target is rejected with a single
/// error and zero writes. Per model: unknown benchmark references are
/// collected as advisory entries, then the record is classified against the
/// target file's model list. Updates are shallow field merges; a record is
/// "identical" when merging it changes nothing, so re-running any batch is a
/// no-op.
pub fn add_models(
    dataset: &Dataset,
    batch: &ModelBatch,
    dry_run: bool,
) -> Result<MergeReport, DatasetError> {
    let mut report = MergeReport::default();

    let Some(target_rel) = resolve_target(batch) else {
        report
            .errors
            .push("must specify either 'provider' or 'target_file'".to_string());
        return Ok(report);
    };

    let mut snapshot = dataset.load()?;
    let known: HashSet<String> = snapshot
        .benchmark_index()
        .keys()
        .map(|id| (*id).to_string())
        .collect();

    let Some(file) = snapshot.model_files.get_mut(&target_rel) else {
        report
            .errors
            .push(format!("target file not found: {target_rel}"));
        return Ok(report);
    };

    for model in &batch.models {
        for bench in model.benchmark_ids() {
            if !known.contains(bench) {
                report
                    .missing_benchmarks
                    .push(format!("{}: {}", model.id, bench));
            }
        }

        match file.position(&model.id) {
            Some(idx) => {
                let merged = file.models[idx].merged_with(model);
                if merged == file.models[idx] {
                    report.skipped.push(format!("{} (identical)", model.id));
                } else {
                    report.updated.push(format!("{} (data differs)", model.id));
                    file.models[idx] = merged;
                    file.last_updated = Some(Utc::now().to_rfc3339());
                    if !dry_run {
                        dataset.write_json(&target_rel, &*file)?;
                    }
                }
            }
            None => {
                report.added.push(model.id.clone());
                file.models.push(model.clone());
                file.last_updated = Some(Utc::now().to_rfc3339());
                if !dry_run {
                    dataset.write_json(&target_rel, &*file)?;
                }
            }
        }
    }

    tracing::info!(
        file = %target_rel,
        added = report.added.len(),
        updated = report.updated.len(),
        skipped = report.skipped.len(),
        missing_benchmarks = report.missing_benchmarks.len(),
        dry_run,
        "model batch merged"
    );
    Ok(report)
}

fn resolve_target(batch: &ModelBatch) -> Option<String> {
    if let Some(rel) = &batch.target_file {
        return Some(rel.clone());
    }
    batch
        .provider
        .as_ref()
        .map(|provider| format!("{MODELS_DIR}/{}.json", provider.to_lowercase()))
}
