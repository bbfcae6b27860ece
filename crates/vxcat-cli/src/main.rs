mod catalog;
mod generate;
mod inspect;
mod pairs;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "vxcat")]
#[command(about = "Optical transceiver catalog toolkit for Shopify CSV exports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the specs and tags extracted from a product title as JSON
    Inspect {
        /// Product title to analyse
        title: String,
    },
    /// Rewrite the Tags column from each row's title, nothing else
    Enrich {
        /// Shopify product CSV to read
        #[arg(long)]
        input: PathBuf,
        /// Where to write the enriched CSV
        #[arg(long)]
        output: PathBuf,
    },
    /// Group variant rows into consolidated products
    Consolidate {
        /// Shopify product CSV to read
        #[arg(long)]
        input: PathBuf,
        /// Where to write the consolidated CSV
        #[arg(long)]
        output: PathBuf,
        /// Drop rows whose title matches this regex (repeatable)
        #[arg(long = "exclude", value_name = "REGEX")]
        exclude: Vec<String>,
        /// Leave zero prices untouched instead of writing a placeholder
        #[arg(long)]
        keep_zero_prices: bool,
        /// Report what would change without writing the output file
        #[arg(long)]
        dry_run: bool,
    },
    /// List industrial-temperature titles that have a standard sibling
    Pairs {
        /// Shopify product CSV to read
        #[arg(long)]
        input: PathBuf,
        /// Maximum number of pairs to print
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Generate variant rows from master product family definitions
    Generate {
        /// YAML file describing the product families
        #[arg(long)]
        families: PathBuf,
        /// Where to write the generated CSV
        #[arg(long)]
        output: PathBuf,
        /// Existing catalog to merge into; rows with a regenerated handle are replaced
        #[arg(long)]
        base: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let config = vxcat_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Inspect { title } => inspect::run_inspect(&title),
        Commands::Enrich { input, output } => catalog::run_enrich(&input, &output),
        Commands::Consolidate {
            input,
            output,
            exclude,
            keep_zero_prices,
            dry_run,
        } => catalog::run_consolidate(
            &config,
            &catalog::ConsolidateArgs {
                input,
                output,
                exclude,
                keep_zero_prices,
                dry_run,
            },
        ),
        Commands::Pairs { input, limit } => pairs::run_pairs(&input, limit),
        Commands::Generate {
            families,
            output,
            base,
        } => generate::run_generate(&config, &families, &output, base.as_deref()),
    }
}

#[cfg(test)]
mod tests;
