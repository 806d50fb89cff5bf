//! KDL configuration parsing for pipewright.
//!
//! This crate handles parsing of pipeline definitions (pipewright.kdl):
//! the repository identity, source connection, build recipe and stage
//! options that the synthesizer turns into a resource graph.

pub mod error;
pub mod pipeline;

pub use error::{ConfigError, ConfigResult};
pub use pipeline::{
    BuildConfig, DeployMode, PipelineConfig, SourceConfig, parse_pipeline_config,
};
