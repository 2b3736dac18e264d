//! Dataset handle and loader.
//!
//! The on-disk tree is the single source of truth:
//!
//! ```text
//! data/
//!   benchmarks/<category>.json     benchmark records grouped by category
//!   benchmarks/categories.json     category index, not itself a category
//!   models/<provider>.json         provider-level model files
//!   models/<provider>/<model>.json per-model files
//!   manifest.json                  list of model files, rebuilt on demand
//! ```
//!
//! Every engine invocation loads the whole tree into a fresh
//! [`DatasetSnapshot`]; nothing is cached across invocations.

use crate::errors::DatasetError;
use crate::record::{BenchmarkRecord, CategoryFile, Manifest, ModelFile, ModelRecord};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Benchmark category files live here, relative to the dataset root.
pub const BENCHMARKS_DIR: &str = "benchmarks";

/// Model files live here, relative to the dataset root.
pub const MODELS_DIR: &str = "models";

/// The category index file, skipped by the loader.
pub const CATEGORY_INDEX_FILE: &str = "categories.json";

/// The rebuilt model-file manifest.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Handle on a dataset directory. Cheap to construct; all I/O happens in the
/// operations that take it.
#[derive(Debug, Clone)]
pub struct Dataset {
    root: PathBuf,
}

impl Dataset {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn benchmarks_dir(&self) -> PathBuf {
        self.root.join(BENCHMARKS_DIR)
    }

    pub fn models_dir(&self) -> PathBuf {
        self.root.join(MODELS_DIR)
    }

    /// Absolute path for a dataset-relative path.
    pub fn resolve(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Load the full tree into memory.
    ///
    /// Fails fast on the first unreadable or malformed JSON file: the merge
    /// engine must operate on a fully consistent view, partial loads would
    /// silently drop data on the next rewrite.
    pub fn load(&self) -> Result<DatasetSnapshot, DatasetError> {
        let mut benchmark_files = BTreeMap::new();
        for name in list_json_files(&self.benchmarks_dir())? {
            if name == CATEGORY_INDEX_FILE {
                continue;
            }
            let rel = format!("{BENCHMARKS_DIR}/{name}");
            let file: CategoryFile = self.read_json(&rel)?;
            benchmark_files.insert(rel, file);
        }

        let mut model_files = BTreeMap::new();
        for name in list_json_files(&self.models_dir())? {
            let rel = format!("{MODELS_DIR}/{name}");
            let file: ModelFile = self.read_json(&rel)?;
            model_files.insert(rel, file);
        }
        for dir in list_subdirs(&self.models_dir())? {
            for name in list_json_files(&self.models_dir().join(&dir))? {
                let rel = format!("{MODELS_DIR}/{dir}/{name}");
                let file: ModelFile = self.read_json(&rel)?;
                model_files.insert(rel, file);
            }
        }

        tracing::debug!(
            benchmark_files = benchmark_files.len(),
            model_files = model_files.len(),
            "loaded dataset from {}",
            self.root.display()
        );

        Ok(DatasetSnapshot {
            benchmark_files,
            model_files,
        })
    }

    /// Parse one dataset-relative JSON file.
    pub(crate) fn read_json<T: DeserializeOwned>(&self, rel: &str) -> Result<T, DatasetError> {
        let path = self.resolve(rel);
        let content = fs::read_to_string(&path).map_err(|e| DatasetError::io(&path, e))?;
        serde_json::from_str(&content).map_err(|e| DatasetError::parse(&path, e))
    }

    /// Rewrite one dataset-relative JSON file in full.
    pub(crate) fn write_json<T: Serialize>(&self, rel: &str, value: &T) -> Result<(), DatasetError> {
        let path = self.resolve(rel);
        let json =
            serde_json::to_string_pretty(value).map_err(|e| DatasetError::serialize(&path, e))?;
        fs::write(&path, json).map_err(|e| DatasetError::io(&path, e))?;
        tracing::debug!("rewrote {}", path.display());
        Ok(())
    }

    /// Rebuild `manifest.json` from the model files currently on disk.
    pub fn write_manifest(&self) -> Result<Manifest, DatasetError> {
        let mut model_files = Vec::new();
        for name in list_json_files(&self.models_dir())? {
            model_files.push(format!("{MODELS_DIR}/{name}"));
        }
        for dir in list_subdirs(&self.models_dir())? {
            for name in list_json_files(&self.models_dir().join(&dir))? {
                model_files.push(format!("{MODELS_DIR}/{dir}/{name}"));
            }
        }
        model_files.sort();

        let manifest = Manifest {
            model_files,
            last_updated: Utc::now().to_rfc3339(),
        };
        self.write_json(MANIFEST_FILE, &manifest)?;
        Ok(manifest)
    }
}

/// JSON file names directly under `dir`, sorted. A missing directory is an
/// empty one.
fn list_json_files(dir: &Path) -> Result<Vec<String>, DatasetError> {
    let mut names = Vec::new();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(names),
        Err(e) => return Err(DatasetError::io(dir, e)),
    };
    for entry in entries {
        let entry = entry.map_err(|e| DatasetError::io(dir, e))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Immediate subdirectory names of `dir`, sorted.
fn list_subdirs(dir: &Path) -> Result<Vec<String>, DatasetError> {
    let mut names = Vec::new();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(names),
        Err(e) => return Err(DatasetError::io(dir, e)),
    };
    for entry in entries {
        let entry = entry.map_err(|e| DatasetError::io(dir, e))?;
        if entry.path().is_dir() {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// In-memory materialization of the whole tree at load time. A disposable
/// read-modify-write view; the files stay authoritative.
#[derive(Debug, Clone)]
pub struct DatasetSnapshot {
    /// Relative path -> parsed category file, `categories.json` excluded
    pub benchmark_files: BTreeMap<String, CategoryFile>,

    /// Relative path -> parsed model file, both provider-level and per-model
    pub model_files: BTreeMap<String, ModelFile>,
}

/// A model together with where it lives.
#[derive(Debug, Clone)]
pub struct ModelLocation<'a> {
    pub model: &'a ModelRecord,
    /// Dataset-relative path of the containing file
    pub file: &'a str,
    /// File-level provider, "Unknown" when the file does not carry one
    pub provider: &'a str,
}

/// Flattened listing row, sorted output of [`DatasetSnapshot::list_models`].
#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub id: String,
    pub name: String,
    pub provider: String,
    pub family: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters_billions: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_parameters_billions: Option<f64>,
    pub file: String,
}

impl DatasetSnapshot {
    /// Flat benchmark index merged across every category file.
    pub fn benchmark_index(&self) -> BTreeMap<&str, &BenchmarkRecord> {
        let mut index = BTreeMap::new();
        for file in self.benchmark_files.values() {
            for (id, record) in &file.benchmarks {
                index.insert(id.as_str(), record);
            }
        }
        index
    }

    /// Relative path of the category file currently holding `id`.
    pub fn benchmark_file_for(&self, id: &str) -> Option<&str> {
        self.benchmark_files
            .iter()
            .find(|(_, file)| file.benchmarks.contains_key(id))
            .map(|(rel, _)| rel.as_str())
    }

    /// Point lookup of one model by id.
    pub fn find_model(&self, id: &str) -> Option<ModelLocation<'_>> {
        for (rel, file) in &self.model_files {
            if let Some(model) = file.models.iter().find(|m| m.id == id) {
                return Some(ModelLocation {
                    model,
                    file: rel,
                    provider: file.provider.as_deref().unwrap_or("Unknown"),
                });
            }
        }
        None
    }

    /// All models, optionally filtered, sorted by (provider, family, id).
    pub fn list_models(&self, provider: Option<&str>, family: Option<&str>) -> Vec<ModelSummary> {
        let mut summaries = Vec::new();
        for (rel, file) in &self.model_files {
            for model in &file.models {
                if let Some(wanted) = provider {
                    if model.provider.as_deref() != Some(wanted) {
                        continue;
                    }
                }
                if let Some(wanted) = family {
                    if model.family.as_deref() != Some(wanted) {
                        continue;
                    }
                }
                summaries.push(ModelSummary {
                    id: model.id.clone(),
                    name: model.name.clone().unwrap_or_else(|| model.id.clone()),
                    provider: model
                        .provider
                        .clone()
                        .unwrap_or_else(|| "Unknown".to_string()),
                    family: model.family.clone().unwrap_or_else(|| "Unknown".to_string()),
                    parameters_billions: model.parameters_billions,
                    active_parameters_billions: model.active_parameters_billions,
                    file: rel.clone(),
                });
            }
        }
        summaries.sort_by(|a, b| {
            a.provider
                .cmp(&b.provider)
                .then_with(|| a.family.cmp(&b.family))
                .then_with(|| a.id.cmp(&b.id))
        });
        summaries
    }
}
