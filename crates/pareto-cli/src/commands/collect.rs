use super::print_report;
use anyhow::{Context, Result};
use pareto::merge;
use pareto::scrape;
use pareto::Dataset;
use std::fs;
use std::path::Path;

/// Fetch a pricing page so it can be handed to an LLM for extraction.
pub fn fetch(url: &str, output: Option<&Path>) -> Result<()> {
    tracing::info!("fetching {}", url);
    let body = scrape::fetch_page(url)?;

    match output {
        Some(path) => {
            fs::write(path, &body)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Saved {} bytes to {}", body.len(), path.display());
        }
        None => println!("{body}"),
    }
    Ok(())
}

/// Turn an LLM pricing response into a model batch and merge it.
pub fn import_pricing(
    dataset: &Dataset,
    provider: &str,
    response_file: &Path,
    target_file: Option<String>,
    url: Option<&str>,
    dry_run: bool,
) -> Result<()> {
    let text = fs::read_to_string(response_file)
        .with_context(|| format!("Failed to read response file {}", response_file.display()))?;

    let rows = scrape::parse_pricing_rows(&text)?;
    println!("Extracted {} pricing rows for {provider}", rows.len());

    let mut batch = scrape::pricing_batch(provider, url, rows);
    if target_file.is_some() {
        batch.target_file = target_file;
    }

    if dry_run {
        println!("\nDRY RUN MODE - no changes will be applied");
    }
    let report = merge::add_models(dataset, &batch, dry_run)?;
    print_report(&report, &format!("Import Pricing: {provider}"));

    if !report.errors.is_empty() {
        anyhow::bail!("pricing batch rejected: {}", report.errors.join("; "));
    }
    Ok(())
}
