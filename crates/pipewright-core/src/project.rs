//! Build projects and their command specifications.

use serde::{Deserialize, Serialize};

/// Buildspec schema version emitted for managed build environments.
pub const BUILDSPEC_VERSION: &str = "0.2";

/// A reusable, named specification of commands run in an external managed
/// build environment. Multiple build actions may reference one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildProject {
    /// Project name, used as the reference target of build actions.
    pub name: String,
    /// The command recipe the build environment executes.
    pub spec: BuildSpec,
}

impl BuildProject {
    pub fn new(name: impl Into<String>, spec: BuildSpec) -> Self {
        Self {
            name: name.into(),
            spec,
        }
    }
}

/// A buildspec document: schema version plus phased command lists.
///
/// Only the `build` phase is modeled; install/pre-build hooks are owned by
/// the external build service defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildSpec {
    pub version: String,
    pub phases: Phases,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phases {
    pub build: BuildPhase,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildPhase {
    pub commands: Vec<String>,
}

impl BuildSpec {
    /// Build a spec from an ordered command list under the current schema
    /// version.
    pub fn from_commands<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            version: BUILDSPEC_VERSION.to_string(),
            phases: Phases {
                build: BuildPhase {
                    commands: commands.into_iter().map(Into::into).collect(),
                },
            },
        }
    }

    /// The build-phase commands in execution order.
    pub fn commands(&self) -> &[String] {
        &self.phases.build.commands
    }
}
