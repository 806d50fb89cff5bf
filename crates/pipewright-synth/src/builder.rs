//! Pipeline definition building.

use pipewright_config::{DeployMode, PipelineConfig};
use pipewright_core::{
    Action, Artifact, BuildAction, BuildProject, BuildSpec, Pipeline, SourceAction, Stage,
};
use tracing::warn;

use crate::SynthResult;

/// Name of the artifact produced by the source stage.
pub const SOURCE_ARTIFACT: &str = "SourceOutput";
/// Name of the single source action.
pub const SOURCE_ACTION_NAME: &str = "GitHub_Source";
/// Name of the shared build project every build action references.
pub const BUILD_PROJECT_NAME: &str = "CodeBuild";

/// A fully assembled pipeline definition: the stage graph plus the build
/// project it references.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineDefinition {
    pub pipeline: Pipeline,
    pub project: BuildProject,
}

/// Assembles a three-stage pipeline definition from configuration.
///
/// Runs once per synthesis; there is no runtime behavior here. The external
/// orchestration service owns execution of whatever this produces.
#[derive(Debug, Clone)]
pub struct PipelineBuilder {
    config: PipelineConfig,
}

impl PipelineBuilder {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Build the Source → Build → Deploy definition.
    ///
    /// The source stage holds one connection-backed source action. The build
    /// stage holds `replicas` identical actions `Build-0` .. `Build-(n-1)`,
    /// all referencing the same project and input artifact. The deploy
    /// stage's content depends on the configured [`DeployMode`]; each stage
    /// owns its own copy of its action list.
    pub fn build(&self) -> SynthResult<PipelineDefinition> {
        let config = &self.config;
        let source_output = Artifact::named(SOURCE_ARTIFACT);

        let source_action = Action::Source(SourceAction {
            name: SOURCE_ACTION_NAME.to_string(),
            owner: config.source.owner.clone(),
            repo: config.source.repo.clone(),
            branch: config.source.branch.clone(),
            connection: config.source.connection.clone(),
            output: source_output.clone(),
            trigger_on_push: config.source.trigger_on_push,
            tag_filter: config.source.tag_filter.clone(),
        });

        let project = BuildProject::new(
            BUILD_PROJECT_NAME,
            BuildSpec::from_commands(config.build.commands.iter().cloned()),
        );

        let build_actions: Vec<Action> = (0..config.build.replicas)
            .map(|i| {
                Action::Build(BuildAction {
                    name: format!("Build-{}", i),
                    project: project.name.clone(),
                    input: source_output.clone(),
                })
            })
            .collect();

        let deploy_actions = match config.deploy {
            DeployMode::ReuseBuildActions => {
                warn!(
                    pipeline = %config.name,
                    "deploy stage reuses the build stage's actions and performs no distinct deployment work"
                );
                build_actions.clone()
            }
            DeployMode::None => Vec::new(),
        };

        let mut pipeline = Pipeline::new(config.name.clone());
        pipeline.cross_account_keys = config.cross_account_keys;
        pipeline.enable_key_rotation = config.enable_key_rotation;
        pipeline.add_stage(Stage::new("Source", vec![source_action]))?;
        pipeline.add_stage(Stage::new("Build", build_actions))?;
        pipeline.add_stage(Stage::new("Deploy", deploy_actions))?;

        Ok(PipelineDefinition { pipeline, project })
    }
}
