//! Core domain types for pipewright pipeline definitions.
//!
//! This crate contains:
//! - Pipeline, stage and action definitions
//! - Artifact handles passed between stages
//! - Build projects and their command specifications
//! - Source-connection identifiers

pub mod action;
pub mod artifact;
pub mod connection;
pub mod error;
pub mod pipeline;
pub mod project;

pub use action::{Action, BuildAction, SourceAction};
pub use artifact::Artifact;
pub use connection::ConnectionArn;
pub use error::{Error, Result};
pub use pipeline::{Pipeline, Stage};
pub use project::{BuildProject, BuildSpec};
