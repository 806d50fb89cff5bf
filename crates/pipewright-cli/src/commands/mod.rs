//! CLI command implementations.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use pipewright_config::{PipelineConfig, parse_pipeline_config};
use pipewright_synth::{PipelineBuilder, ResourceGraph};

pub fn synth(config_path: &Path, out: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let definition = PipelineBuilder::new(config).build()?;
    let graph = ResourceGraph::synthesize(&definition)?;
    let json = graph.to_json()?;

    match out {
        Some(path) => {
            fs::write(path, &json)
                .with_context(|| format!("writing template to {}", path.display()))?;
            tracing::info!(path = %path.display(), "template written");
        }
        None => println!("{}", json),
    }
    Ok(())
}

pub fn validate(config_path: &Path) -> Result<()> {
    match load_config(config_path) {
        Ok(config) => {
            println!(
                "Configuration is valid: pipeline '{}', {} build action(s)",
                config.name, config.build.replicas
            );
            Ok(())
        }
        Err(e) => {
            println!("Configuration error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn load_config(path: &Path) -> Result<PipelineConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading configuration from {}", path.display()))?;
    let config = parse_pipeline_config(&content)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}
