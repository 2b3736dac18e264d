use crate::commands;
use anyhow::Result;
use clap::{Parser, Subcommand};
use pareto::Dataset;
use std::path::PathBuf;

/// Manage the LLM Pareto dataset: add models and benchmarks with validation.
#[derive(Parser, Debug)]
#[command(name = "pareto")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Dataset root directory
    #[arg(long, global = true, default_value = "data")]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add or update benchmarks from a batch file
    AddBenchmarks {
        /// JSON file with benchmarks to add
        input_file: PathBuf,

        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,
    },

    /// Add or update models from a batch file
    AddModels {
        /// JSON file with models to add
        input_file: PathBuf,

        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate the entire dataset for consistency
    Validate,

    /// Show one model by id
    Query {
        /// Model id to look up
        model_id: String,
    },

    /// List models, optionally filtered
    List {
        /// Filter by provider
        #[arg(long)]
        provider: Option<String>,

        /// Filter by family
        #[arg(long)]
        family: Option<String>,
    },

    /// Rebuild manifest.json from the model files on disk
    Manifest,

    /// Fetch a pricing page and print or save its raw content
    Fetch {
        /// Page url
        url: String,

        /// Save to a file instead of printing
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Merge an LLM pricing response into the dataset
    ImportPricing {
        /// Provider name, resolves the target provider file
        provider: String,

        /// File holding the LLM response text
        response_file: PathBuf,

        /// Explicit dataset-relative target file
        #[arg(long)]
        target_file: Option<String>,

        /// Source url recorded in the pricing metadata
        #[arg(long)]
        url: Option<String>,

        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Fetch is the one command that does not touch the dataset.
    if let Commands::Fetch { url, output } = &cli.command {
        return commands::collect::fetch(url, output.as_deref());
    }

    if !cli.data_dir.exists() {
        anyhow::bail!("data directory not found: {}", cli.data_dir.display());
    }
    let dataset = Dataset::new(&cli.data_dir);

    match cli.command {
        Commands::AddBenchmarks {
            input_file,
            dry_run,
        } => commands::add::benchmarks(&dataset, &input_file, dry_run),
        Commands::AddModels {
            input_file,
            dry_run,
        } => commands::add::models(&dataset, &input_file, dry_run),
        Commands::Validate => commands::validate::handle(&dataset),
        Commands::Query { model_id } => commands::query::handle(&dataset, &model_id),
        Commands::List { provider, family } => {
            commands::list::handle(&dataset, provider.as_deref(), family.as_deref())
        }
        Commands::Manifest => commands::manifest::handle(&dataset),
        Commands::Fetch { .. } => unreachable!("handled above"),
        Commands::ImportPricing {
            provider,
            response_file,
            target_file,
            url,
            dry_run,
        } => commands::collect::import_pricing(
            &dataset,
            &provider,
            &response_file,
            target_file,
            url.as_deref(),
            dry_run,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_benchmarks() {
        let cli = Cli::try_parse_from(["pareto", "add-benchmarks", "batch.json", "--dry-run"])
            .unwrap();
        match cli.command {
            Commands::AddBenchmarks {
                input_file,
                dry_run,
            } => {
                assert_eq!(input_file, PathBuf::from("batch.json"));
                assert!(dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_list_filters() {
        let cli = Cli::try_parse_from([
            "pareto",
            "list",
            "--provider",
            "OpenAI",
            "--family",
            "GPT-4",
        ])
        .unwrap();
        match cli.command {
            Commands::List { provider, family } => {
                assert_eq!(provider.as_deref(), Some("OpenAI"));
                assert_eq!(family.as_deref(), Some("GPT-4"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_data_dir_is_global() {
        let cli =
            Cli::try_parse_from(["pareto", "validate", "--data-dir", "/tmp/dataset"]).unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/dataset"));
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["pareto"]).is_err());
    }
}
