use super::print_header;
use anyhow::Result;
use pareto::Dataset;

pub fn handle(dataset: &Dataset) -> Result<()> {
    let snapshot = dataset.load()?;
    let report = pareto::validate(&snapshot);

    print_header("Dataset Validation");

    if !report.errors.is_empty() {
        println!("\nErrors ({}):", report.errors.len());
        for error in &report.errors {
            println!("  x {error}");
        }
    }
    if !report.warnings.is_empty() {
        println!("\nWarnings ({}):", report.warnings.len());
        for warning in &report.warnings {
            println!("  ! {warning}");
        }
    }

    if report.valid && report.warnings.is_empty() {
        println!("\nDataset is valid\n");
    } else if report.valid {
        println!("\nDataset is valid (with warnings)\n");
    } else {
        println!("\nDataset has errors\n");
        anyhow::bail!("validation failed with {} error(s)", report.errors.len());
    }
    Ok(())
}
