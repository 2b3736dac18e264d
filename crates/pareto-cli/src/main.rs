use anyhow::Result;

fn main() -> Result<()> {
    if let Err(e) = pareto_cli::logging::setup_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    pareto_cli::cli::run()
}
