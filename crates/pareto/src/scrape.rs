//! Pricing-collection boundary.
//!
//! Fetching a provider pricing page and turning an LLM's extraction of it
//! into a model batch. The LLM call itself happens outside this crate; we
//! consume its textual response.

use crate::extract::extract_json;
use crate::merge::ModelBatch;
use crate::record::{ModelRecord, Pricing, PricingSource};
use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// User-Agent sent with pricing-page fetches.
pub const USER_AGENT: &str = "Mozilla/5.0 (LLM Pareto Data Collector)";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetch a pricing page for prompting. Non-success status is an error.
pub fn fetch_page(url: &str) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")?;

    let response = client
        .get(url)
        .send()
        .with_context(|| format!("Failed to fetch {url}"))?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("{url} returned status {status}");
    }

    response
        .text()
        .with_context(|| format!("Failed to read body from {url}"))
}

/// One pricing row in the shape the extraction prompt asks for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingRow {
    /// Lowercase-with-hyphens slug, e.g. "gpt-4o"
    pub model_id: String,
    pub model_name: String,
    pub input_per_1m_tokens: f64,
    pub output_per_1m_tokens: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Recover pricing rows from an LLM response.
pub fn parse_pricing_rows(text: &str) -> Result<Vec<PricingRow>> {
    let value = extract_json(text)?;
    let rows: Vec<PricingRow> =
        serde_json::from_value(value).context("extracted JSON is not an array of pricing rows")?;
    Ok(rows)
}

/// Convert pricing rows into a model batch for [`crate::merge::add_models`].
///
/// Existing models get their pricing overwritten by the shallow merge; rows
/// for unknown models become minimal records with a guessed family, matching
/// what a curator would hand-write before filling in benchmarks.
pub fn pricing_batch(provider: &str, url: Option<&str>, rows: Vec<PricingRow>) -> ModelBatch {
    let collected = Utc::now().to_rfc3339();
    let models = rows
        .into_iter()
        .map(|row| {
            let family = guess_family(&row.model_name);
            ModelRecord {
                id: row.model_id,
                name: Some(row.model_name),
                provider: Some(provider.to_string()),
                family: Some(family.to_string()),
                parameters_billions: None,
                active_parameters_billions: None,
                pricing: Some(Pricing {
                    input_per_1m_tokens: row.input_per_1m_tokens,
                    output_per_1m_tokens: row.output_per_1m_tokens,
                    source: Some(PricingSource {
                        url: url.map(str::to_string),
                        kind: Some("primary".to_string()),
                        collected: Some(collected.clone()),
                        scrape_method: Some("llm".to_string()),
                    }),
                    extra: Default::default(),
                }),
                benchmarks: None,
                extra: Default::default(),
            }
        })
        .collect();

    ModelBatch {
        provider: Some(provider.to_string()),
        target_file: None,
        models,
    }
}

/// Rough family bucket from a display name, for newly discovered models.
pub fn guess_family(name: &str) -> &'static str {
    let lower = name.to_lowercase();
    if lower.contains("gpt") {
        if lower.contains("gpt-4") {
            "GPT-4"
        } else {
            "GPT-3"
        }
    } else if lower.contains("claude") {
        "Claude"
    } else if lower.contains("gemini") {
        "Gemini"
    } else if lower.contains("llama") {
        "Llama"
    } else {
        "Other"
    }
}
