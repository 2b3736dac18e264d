//! Curation engine for the LLM Pareto frontier dataset.
//!
//! The dataset is a tree of JSON files (benchmarks grouped by category,
//! models grouped by provider) and this crate is the only thing that should
//! rewrite them: it loads the whole tree, diffs incoming batches against it,
//! applies accepted changes file-by-file, and checks the global invariants.

pub mod dataset;
pub mod errors;
pub mod extract;
pub mod merge;
pub mod record;
pub mod scrape;
pub mod validate;

pub use dataset::{Dataset, DatasetSnapshot, ModelLocation, ModelSummary};
pub use errors::DatasetError;
pub use extract::{extract_json, ExtractError};
pub use merge::{add_benchmarks, add_models, BenchmarkBatch, MergeReport, ModelBatch};
pub use record::{BenchmarkRecord, ModelRecord, Pricing};
pub use validate::{validate, ValidationReport};
