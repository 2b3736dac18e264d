use super::print_header;
use anyhow::Result;
use pareto::{Dataset, ModelSummary};

pub fn handle(dataset: &Dataset, provider: Option<&str>, family: Option<&str>) -> Result<()> {
    let snapshot = dataset.load()?;
    let models = snapshot.list_models(provider, family);

    if models.is_empty() {
        anyhow::bail!("no models found matching criteria");
    }

    print_header(&format!("Models ({})", models.len()));

    let mut current_provider: Option<&str> = None;
    for model in &models {
        if current_provider != Some(model.provider.as_str()) {
            current_provider = Some(model.provider.as_str());
            println!("\n{}:", model.provider);
        }
        println!("  {}: {}{}", model.id, model.name, params_suffix(model));
    }

    println!();
    Ok(())
}

fn params_suffix(model: &ModelSummary) -> String {
    match (model.active_parameters_billions, model.parameters_billions) {
        (Some(active), Some(total)) => format!(" ({active}B / {total}B)"),
        (None, Some(total)) => format!(" ({total}B)"),
        _ => String::new(),
    }
}
