//! Pipeline definition building and resource-graph synthesis.
//!
//! This crate turns a parsed [`PipelineConfig`](pipewright_config::PipelineConfig)
//! into a three-stage pipeline definition and serializes it as a
//! deterministic resource-graph template for an external deployment tool.

pub mod builder;
pub mod error;
pub mod graph;

pub use builder::{PipelineBuilder, PipelineDefinition};
pub use error::{SynthError, SynthResult};
pub use graph::{Resource, ResourceGraph};
