//! End-to-end merge flows over on-disk datasets.

use pareto::merge::{add_benchmarks, add_models, BenchmarkBatch, ModelBatch};
use pareto::record::ModelFile;
use pareto::validate::validate;
use pareto::Dataset;
use serde_json::json;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_file(root: &Path, rel: &str, value: serde_json::Value) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

/// The dataset from the end-to-end scenario: one OpenAI model, a knowledge
/// category file that does not know "mmlu" yet.
fn scenario_fixture() -> (TempDir, Dataset) {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "benchmarks/knowledge.json",
        json!({"benchmarks": {"gsm8k": {"category": "knowledge"}}}),
    );
    write_file(
        dir.path(),
        "models/openai.json",
        json!({
            "provider": "OpenAI",
            "models": [{"id": "gpt-4o", "name": "GPT-4o"}]
        }),
    );
    let dataset = Dataset::new(dir.path());
    (dir, dataset)
}

/// All file contents under the dataset root, for before/after comparisons.
fn tree_contents(root: &Path) -> BTreeMap<String, String> {
    let mut contents = BTreeMap::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else {
                let rel = path.strip_prefix(root).unwrap().display().to_string();
                contents.insert(rel, fs::read_to_string(&path).unwrap());
            }
        }
    }
    contents
}

fn model_batch(value: serde_json::Value) -> ModelBatch {
    serde_json::from_value(value).unwrap()
}

fn benchmark_batch(value: serde_json::Value) -> BenchmarkBatch {
    serde_json::from_value(value).unwrap()
}

#[test]
fn end_to_end_scenario() {
    let (dir, dataset) = scenario_fixture();
    let batch = model_batch(json!({
        "provider": "openai",
        "models": [{
            "id": "gpt-4o",
            "name": "GPT-4o",
            "benchmarks": {"mmlu": {"score": 85.0}}
        }]
    }));

    let report = add_models(&dataset, &batch, false).unwrap();
    assert_eq!(report.updated, vec!["gpt-4o (data differs)"]);
    assert_eq!(report.missing_benchmarks, vec!["gpt-4o: mmlu"]);
    assert!(report.errors.is_empty());

    let file: ModelFile = serde_json::from_str(
        &fs::read_to_string(dir.path().join("models/openai.json")).unwrap(),
    )
    .unwrap();
    let model = &file.models[0];
    assert_eq!(model.name.as_deref(), Some("GPT-4o"));
    let benchmarks = model.benchmarks.as_ref().unwrap();
    assert_eq!(benchmarks["mmlu"].score, Some(85.0));
}

#[test]
fn add_models_is_idempotent() {
    let (dir, dataset) = scenario_fixture();
    let batch = model_batch(json!({
        "provider": "openai",
        "models": [{
            "id": "gpt-4o",
            "name": "GPT-4o",
            "family": "GPT-4",
            "pricing": {"input_per_1m_tokens": 5.0, "output_per_1m_tokens": 15.0}
        }]
    }));

    let first = add_models(&dataset, &batch, false).unwrap();
    assert_eq!(first.updated, vec!["gpt-4o (data differs)"]);
    let after_first = tree_contents(dir.path());

    let second = add_models(&dataset, &batch, false).unwrap();
    assert_eq!(second.skipped, vec!["gpt-4o (identical)"]);
    assert!(second.updated.is_empty() && second.added.is_empty());

    let after_second = tree_contents(dir.path());
    assert_eq!(after_first, after_second);
}

#[test]
fn add_benchmarks_is_idempotent() {
    let (dir, dataset) = scenario_fixture();
    let batch = benchmark_batch(json!({"benchmarks": {
        "mmlu": {"category": "knowledge", "name": "MMLU"}
    }}));

    let first = add_benchmarks(&dataset, &batch, false).unwrap();
    assert_eq!(first.added, vec!["mmlu"]);
    let after_first = tree_contents(dir.path());

    let second = add_benchmarks(&dataset, &batch, false).unwrap();
    assert_eq!(second.skipped, vec!["mmlu (identical)"]);

    assert_eq!(after_first, tree_contents(dir.path()));
}

#[test]
fn dry_run_report_matches_real_run() {
    let batch_value = json!({
        "provider": "openai",
        "models": [
            {"id": "gpt-4o", "pricing": {"input_per_1m_tokens": 5.0, "output_per_1m_tokens": 15.0}},
            {"id": "o3", "name": "o3", "benchmarks": {"mmlu": {"score": 92.0}}}
        ]
    });

    let (dir, dataset) = scenario_fixture();
    let before = tree_contents(dir.path());
    let preview = add_models(&dataset, &model_batch(batch_value.clone()), true).unwrap();
    assert_eq!(before, tree_contents(dir.path()), "preview must not touch any file");

    let applied = add_models(&dataset, &model_batch(batch_value), false).unwrap();
    assert_eq!(preview, applied);
    assert_ne!(before, tree_contents(dir.path()));
}

#[test]
fn missing_target_rejected_in_both_modes() {
    for dry_run in [true, false] {
        let (dir, dataset) = scenario_fixture();
        let before = tree_contents(dir.path());

        let batch = model_batch(json!({"models": [{"id": "gpt-4o"}]}));
        let report = add_models(&dataset, &batch, dry_run).unwrap();

        assert_eq!(report.errors.len(), 1, "dry_run={dry_run}");
        assert!(report.added.is_empty() && report.updated.is_empty() && report.skipped.is_empty());
        assert_eq!(before, tree_contents(dir.path()), "dry_run={dry_run}");
    }
}

#[test]
fn duplicate_benchmark_key_fails_validation() {
    let (dir, dataset) = scenario_fixture();
    write_file(
        dir.path(),
        "benchmarks/coding.json",
        json!({"benchmarks": {"gsm8k": {"category": "coding"}}}),
    );

    let report = validate(&dataset.load().unwrap());
    assert!(!report.valid);
    assert!(report.errors.iter().any(|e| e.contains("gsm8k")));
}

#[test]
fn dangling_reference_keeps_dataset_valid() {
    let (_dir, dataset) = scenario_fixture();
    let batch = model_batch(json!({
        "provider": "openai",
        "models": [{"id": "gpt-4o", "benchmarks": {"nonexistent-bench": {"score": 1.0}}}]
    }));
    add_models(&dataset, &batch, false).unwrap();

    let report = validate(&dataset.load().unwrap());
    assert!(report.valid);
    assert_eq!(
        report.warnings,
        vec!["gpt-4o references unknown benchmark: nonexistent-bench"]
    );
}

#[test]
fn full_curation_cycle() {
    let (_dir, dataset) = scenario_fixture();

    // Benchmarks first, then models referencing them, then validate clean.
    let benchmarks = benchmark_batch(json!({"benchmarks": {
        "mmlu": {"category": "knowledge", "name": "MMLU"}
    }}));
    let report = add_benchmarks(&dataset, &benchmarks, false).unwrap();
    assert_eq!(report.added, vec!["mmlu"]);

    let models = model_batch(json!({
        "provider": "openai",
        "models": [{"id": "gpt-4o", "benchmarks": {"mmlu": {"score": 85.0}}}]
    }));
    let report = add_models(&dataset, &models, false).unwrap();
    assert!(report.missing_benchmarks.is_empty());

    let validation = validate(&dataset.load().unwrap());
    assert!(validation.valid);
    assert!(validation.warnings.is_empty());

    let manifest = dataset.write_manifest().unwrap();
    assert_eq!(manifest.model_files, vec!["models/openai.json"]);
}
