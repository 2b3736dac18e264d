//! Whole-dataset consistency checks.

use crate::dataset::DatasetSnapshot;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated result of the three validation checks. Warnings never flip
/// `valid`; only uniqueness violations do.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Run uniqueness and referential checks over a loaded snapshot.
///
/// - a benchmark id in more than one category file is an error
/// - a model id in more than one file across the tree is an error
/// - a model referencing a benchmark absent from the index is a warning,
///   benchmarks and models are contributed out of order all the time
pub fn validate(snapshot: &DatasetSnapshot) -> ValidationReport {
    let mut report = ValidationReport::default();

    let mut benchmark_owners: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (rel, file) in &snapshot.benchmark_files {
        for id in file.benchmarks.keys() {
            benchmark_owners
                .entry(id.as_str())
                .or_default()
                .push(rel.as_str());
        }
    }
    for (id, owners) in &benchmark_owners {
        if owners.len() > 1 {
            report.errors.push(format!(
                "duplicate benchmark id '{}' in {}",
                id,
                owners.join(", ")
            ));
        }
    }

    let mut model_owners: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (rel, file) in &snapshot.model_files {
        for model in &file.models {
            model_owners
                .entry(model.id.as_str())
                .or_default()
                .push(rel.as_str());
        }
    }
    for (id, owners) in &model_owners {
        if owners.len() > 1 {
            report.errors.push(format!(
                "duplicate model id '{}' in {}",
                id,
                owners.join(", ")
            ));
        }
    }

    for file in snapshot.model_files.values() {
        for model in &file.models {
            for bench in model.benchmark_ids() {
                if !benchmark_owners.contains_key(bench) {
                    report.warnings.push(format!(
                        "{} references unknown benchmark: {}",
                        model.id, bench
                    ));
                }
            }
        }
    }

    report.valid = report.errors.is_empty();
    report
}
