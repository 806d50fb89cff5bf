//! Stage actions.

use serde::{Deserialize, Serialize};

use crate::{Artifact, ConnectionArn};

/// A single unit of work within a stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Fetch a repository revision through a source connection.
    Source(SourceAction),
    /// Run a build project against an input artifact.
    Build(BuildAction),
}

impl Action {
    /// The action name, unique within its stage.
    pub fn name(&self) -> &str {
        match self {
            Action::Source(a) => &a.name,
            Action::Build(a) => &a.name,
        }
    }
}

/// A source action: fetches a branch of an external repository via a
/// connection credential and emits the checked-out tree as an artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceAction {
    /// Action name.
    pub name: String,
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Branch to fetch.
    pub branch: String,
    /// Connection credential reference.
    pub connection: ConnectionArn,
    /// Artifact this action produces.
    pub output: Artifact,
    /// Start the pipeline automatically on push to the branch.
    pub trigger_on_push: bool,
    /// Optional tag pattern restricting push triggers.
    pub tag_filter: Option<String>,
}

/// A build action: runs a named build project with one input artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildAction {
    /// Action name.
    pub name: String,
    /// Name of the build project to run.
    pub project: String,
    /// Artifact handed to the build environment.
    pub input: Artifact,
}
