//! Record types for the on-disk dataset.
//!
//! Files are loosely-schemaed JSON maintained partly by hand, so every record
//! keeps a flattened `extra` map: fields the schema does not model survive a
//! load/rewrite cycle untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A benchmark definition, keyed by its id inside a category file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    /// Topical category, resolves which `benchmarks/<category>.json` file
    /// owns the record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Descriptive attributes (name, description, source url, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-benchmark score entry inside a model record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkScore {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Where a pricing figure came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Source tier ("primary", "secondary")
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// RFC 3339 stamp of when the figure was collected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collected: Option<String>,

    /// How the figure was obtained ("llm", "api", "manual")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrape_method: Option<String>,
}

/// Pricing for a model, in USD per million tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    pub input_per_1m_tokens: f64,
    pub output_per_1m_tokens: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PricingSource>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single model entry.
///
/// `id` is the only required field; batches missing it are rejected at parse
/// time. Everything else is optional so partial records can be merged in as
/// data becomes available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    /// Provider-scoped slug, e.g. "gpt-4o" or "claude-3-5-sonnet"
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    /// Total parameter count in billions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters_billions: Option<f64>,

    /// Active parameter count in billions (MoE models)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_parameters_billions: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing: Option<Pricing>,

    /// Benchmark id -> score entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmarks: Option<BTreeMap<String, BenchmarkScore>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModelRecord {
    /// Shallow field merge: every top-level field present in `update`
    /// replaces the current value, fields absent from `update` are kept.
    /// The `benchmarks` map is a single top-level field and is replaced
    /// wholesale, not merged per key.
    pub fn merged_with(&self, update: &ModelRecord) -> ModelRecord {
        let mut merged = self.clone();
        merged.id = update.id.clone();
        if update.name.is_some() {
            merged.name = update.name.clone();
        }
        if update.provider.is_some() {
            merged.provider = update.provider.clone();
        }
        if update.family.is_some() {
            merged.family = update.family.clone();
        }
        if update.parameters_billions.is_some() {
            merged.parameters_billions = update.parameters_billions;
        }
        if update.active_parameters_billions.is_some() {
            merged.active_parameters_billions = update.active_parameters_billions;
        }
        if update.pricing.is_some() {
            merged.pricing = update.pricing.clone();
        }
        if update.benchmarks.is_some() {
            merged.benchmarks = update.benchmarks.clone();
        }
        for (key, value) in &update.extra {
            merged.extra.insert(key.clone(), value.clone());
        }
        merged
    }

    /// Benchmark ids this model references
    pub fn benchmark_ids(&self) -> impl Iterator<Item = &str> {
        self.benchmarks
            .iter()
            .flat_map(|map| map.keys())
            .map(String::as_str)
    }
}

/// One `benchmarks/<category>.json` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryFile {
    #[serde(default)]
    pub benchmarks: BTreeMap<String, BenchmarkRecord>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One model file under `models/`, either a provider-level file or a
/// per-model file inside a provider subdirectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    /// RFC 3339 stamp refreshed on every accepted write
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,

    #[serde(default)]
    pub models: Vec<ModelRecord>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModelFile {
    /// Position of a model in this file by id
    pub fn position(&self, id: &str) -> Option<usize> {
        self.models.iter().position(|m| m.id == id)
    }
}

/// The `data/manifest.json` index of model files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub model_files: Vec<String>,
    pub last_updated: String,
}
