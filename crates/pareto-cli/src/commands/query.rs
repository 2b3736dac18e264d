use super::print_header;
use anyhow::Result;
use pareto::Dataset;

pub fn handle(dataset: &Dataset, model_id: &str) -> Result<()> {
    let snapshot = dataset.load()?;
    let Some(found) = snapshot.find_model(model_id) else {
        anyhow::bail!("model '{model_id}' not found");
    };
    let model = found.model;

    print_header(&format!(
        "Model: {}",
        model.name.as_deref().unwrap_or(&model.id)
    ));
    println!("\nID: {}", model.id);
    println!("Provider: {}", found.provider);
    println!("Family: {}", model.family.as_deref().unwrap_or("N/A"));
    println!("File: {}", found.file);

    if let Some(params) = model.parameters_billions {
        println!("\nTotal Parameters: {params}B");
    }
    if let Some(params) = model.active_parameters_billions {
        println!("Active Parameters: {params}B");
    }

    if let Some(source) = model.extra.get("parameters_source") {
        println!("\nParameter Source:");
        for field in ["type", "url", "notes"] {
            if let Some(value) = source.get(field).and_then(|v| v.as_str()) {
                println!("  {field}: {value}");
            }
        }
    }

    if let Some(pricing) = &model.pricing {
        println!("\nPricing:");
        println!("  Input: ${:.2} per 1M tokens", pricing.input_per_1m_tokens);
        println!(
            "  Output: ${:.2} per 1M tokens",
            pricing.output_per_1m_tokens
        );
    }

    if let Some(benchmarks) = &model.benchmarks {
        if !benchmarks.is_empty() {
            println!("\nBenchmarks ({}):", benchmarks.len());
            for (id, entry) in benchmarks {
                match entry.score {
                    Some(score) => println!("  {id}: {score}"),
                    None => println!("  {id}: N/A"),
                }
            }
        }
    }

    println!();
    Ok(())
}
