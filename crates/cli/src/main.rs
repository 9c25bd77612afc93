//! CLI tool for building chat fine-tuning data from Tumblr post exports.
//!
//! Reads every export file in the data directory, writes one JSONL record per
//! original post and prints an estimate of the tokens and cost of training on
//! the result.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tumblr_sft_serializer_core::{run, Config, CostEstimate};

/// Serialize Tumblr post exports to chat fine-tuning JSONL.
#[derive(Parser, Debug)]
#[command(name = "tumblr-sft-serialize")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML config file (built-in defaults are used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory containing the export files
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Output JSONL file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Model whose tokenizer and pricing are used
    #[arg(long)]
    model: Option<String>,

    /// Number of epochs the corpus is expected to be trained for
    #[arg(long)]
    epochs: Option<u32>,
}

impl Args {
    fn into_config(self) -> Result<Config, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(dir) = self.data_dir {
            config.training.data_directory = dir;
        }
        if let Some(output) = self.output {
            config.training.output_file = output;
        }
        if let Some(model) = self.model {
            config.model_name = model;
        }
        if let Some(epochs) = self.epochs {
            config.training.expected_epochs = epochs;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Args::parse().into_config()?;

    info!(
        dir = %config.training.data_directory.display(),
        model = %config.model_name,
        "Processing export files"
    );
    let stats = run(&config)?;
    info!(
        records = stats.records_written,
        skipped = stats.posts_skipped,
        "Finished writing corpus"
    );

    let estimate = CostEstimate::new(
        &config.model_name,
        stats.total_tokens,
        config.training.expected_epochs,
    );
    println!("{}", estimate);
    println!();
    println!(
        "The training data has been written to {:?}.",
        config.training.output_file
    );

    Ok(())
}
