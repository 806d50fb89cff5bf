//! Pipewright CLI tool.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "pipewright")]
#[command(about = "Declarative delivery-pipeline synthesis", long_about = None)]
struct Cli {
    /// Path to the pipeline configuration file
    #[arg(long, env = "PIPEWRIGHT_CONFIG", default_value = "pipewright.kdl")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize the resource-graph template
    Synth {
        /// Write the template to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Validate a pipeline configuration
    Validate,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Synth { out } => {
            commands::synth(&cli.config, out.as_deref())?;
        }
        Commands::Validate => {
            commands::validate(&cli.config)?;
        }
    }

    Ok(())
}
