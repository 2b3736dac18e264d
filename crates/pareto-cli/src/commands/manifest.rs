use anyhow::Result;
use pareto::Dataset;

pub fn handle(dataset: &Dataset) -> Result<()> {
    let manifest = dataset.write_manifest()?;
    println!(
        "Updated manifest.json with {} model files",
        manifest.model_files.len()
    );
    Ok(())
}
