//! Resource-graph synthesis.
//!
//! Turns a [`PipelineDefinition`] into a CloudFormation-style template:
//! a map of logical IDs to typed resources. All maps are ordered, so
//! identical definitions serialize to identical text.

use serde::Serialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;

use pipewright_core::{Action, BuildAction, Pipeline, SourceAction, Stage};

use crate::builder::PipelineDefinition;
use crate::SynthResult;

/// Logical ID of the pipeline resource.
pub const PIPELINE_LOGICAL_ID: &str = "Pipeline";
/// Logical ID of the build-project resource.
pub const PROJECT_LOGICAL_ID: &str = "CodeBuild";

const PIPELINE_TYPE: &str = "AWS::CodePipeline::Pipeline";
const PROJECT_TYPE: &str = "AWS::CodeBuild::Project";

/// A synthesized resource graph, keyed by logical ID.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceGraph {
    #[serde(rename = "Resources")]
    resources: BTreeMap<String, Resource>,
}

/// One typed resource in the graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Properties")]
    pub properties: Value,
}

impl ResourceGraph {
    /// Synthesize the graph for a pipeline definition.
    pub fn synthesize(def: &PipelineDefinition) -> SynthResult<Self> {
        let mut resources = BTreeMap::new();

        resources.insert(
            PROJECT_LOGICAL_ID.to_string(),
            Resource {
                kind: PROJECT_TYPE.to_string(),
                properties: json!({
                    "Name": def.project.name,
                    "Source": {
                        "Type": "CODEPIPELINE",
                        "BuildSpec": serde_json::to_value(&def.project.spec)?,
                    },
                }),
            },
        );

        resources.insert(
            PIPELINE_LOGICAL_ID.to_string(),
            Resource {
                kind: PIPELINE_TYPE.to_string(),
                properties: pipeline_properties(&def.pipeline),
            },
        );

        Ok(Self { resources })
    }

    /// Look up a resource by logical ID.
    pub fn resource(&self, logical_id: &str) -> Option<&Resource> {
        self.resources.get(logical_id)
    }

    /// Serialize the graph as pretty-printed JSON.
    pub fn to_json(&self) -> SynthResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn pipeline_properties(pipeline: &Pipeline) -> Value {
    json!({
        "Name": pipeline.name,
        "CrossAccountKeys": pipeline.cross_account_keys,
        "EnableKeyRotation": pipeline.enable_key_rotation,
        "Stages": pipeline.stages.iter().map(stage_value).collect::<Vec<_>>(),
    })
}

fn stage_value(stage: &Stage) -> Value {
    json!({
        "Name": stage.name,
        "Actions": stage.actions.iter().map(action_value).collect::<Vec<_>>(),
    })
}

fn action_value(action: &Action) -> Value {
    match action {
        Action::Source(a) => source_action_value(a),
        Action::Build(a) => build_action_value(a),
    }
}

fn source_action_value(action: &SourceAction) -> Value {
    let mut configuration = json!({
        "ConnectionArn": action.connection.as_str(),
        "FullRepositoryId": format!("{}/{}", action.owner, action.repo),
        "BranchName": action.branch,
        "DetectChanges": action.trigger_on_push,
    });
    if let Some(filter) = &action.tag_filter {
        configuration["TagFilter"] = Value::String(filter.clone());
    }

    json!({
        "Name": action.name,
        "Category": "Source",
        "Provider": "CodeStarSourceConnection",
        "Configuration": configuration,
        "OutputArtifacts": [{ "Name": action.output.name() }],
    })
}

fn build_action_value(action: &BuildAction) -> Value {
    json!({
        "Name": action.name,
        "Category": "Build",
        "Provider": "CodeBuild",
        "Configuration": { "ProjectName": action.project },
        "InputArtifacts": [{ "Name": action.input.name() }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::PipelineBuilder;
    use pipewright_config::{
        BuildConfig, DeployMode, PipelineConfig, SourceConfig, parse_pipeline_config,
    };
    use pipewright_core::ConnectionArn;

    fn sample_config() -> PipelineConfig {
        PipelineConfig {
            name: "TestPipeline".to_string(),
            source: SourceConfig {
                owner: "kaito01234".to_string(),
                repo: "github-branching-strategy".to_string(),
                branch: "production".to_string(),
                connection: ConnectionArn::parse(
                    "arn:aws:codestar-connections:ap-northeast-1:948669373988:connection/868491e5-ad8b-4ec1-bdb3-43b676d9021b",
                )
                .unwrap(),
                trigger_on_push: true,
                tag_filter: None,
            },
            build: BuildConfig {
                replicas: 3,
                commands: vec![
                    "echo $CODEBUILD_RESOLVED_SOURCE_VERSION".to_string(),
                    "cat fixfiles/newfile1.md".to_string(),
                ],
            },
            deploy: DeployMode::ReuseBuildActions,
            cross_account_keys: false,
            enable_key_rotation: false,
        }
    }

    fn synthesize(config: PipelineConfig) -> ResourceGraph {
        let def = PipelineBuilder::new(config).build().unwrap();
        ResourceGraph::synthesize(&def).unwrap()
    }

    #[test]
    fn test_graph_contains_both_resources() {
        let graph = synthesize(sample_config());
        assert_eq!(
            graph.resource(PIPELINE_LOGICAL_ID).unwrap().kind,
            "AWS::CodePipeline::Pipeline"
        );
        assert_eq!(
            graph.resource(PROJECT_LOGICAL_ID).unwrap().kind,
            "AWS::CodeBuild::Project"
        );
    }

    #[test]
    fn test_pipeline_stage_structure() {
        let graph = synthesize(sample_config());
        let props = &graph.resource(PIPELINE_LOGICAL_ID).unwrap().properties;

        let stages = props["Stages"].as_array().unwrap();
        assert_eq!(stages.len(), 3);
        assert_eq!(stages[0]["Name"], "Source");
        assert_eq!(stages[1]["Name"], "Build");
        assert_eq!(stages[2]["Name"], "Deploy");

        let source_actions = stages[0]["Actions"].as_array().unwrap();
        assert_eq!(source_actions.len(), 1);
        assert_eq!(source_actions[0]["Configuration"]["BranchName"], "production");
        assert_eq!(
            source_actions[0]["Configuration"]["FullRepositoryId"],
            "kaito01234/github-branching-strategy"
        );

        let build_actions = stages[1]["Actions"].as_array().unwrap();
        assert_eq!(build_actions.len(), 3);
        for (i, action) in build_actions.iter().enumerate() {
            assert_eq!(action["Name"], format!("Build-{}", i));
            assert_eq!(action["Configuration"]["ProjectName"], "CodeBuild");
            assert_eq!(action["InputArtifacts"][0]["Name"], "SourceOutput");
        }

        // Deploy mirrors Build in the reuse configuration.
        assert_eq!(stages[2]["Actions"], stages[1]["Actions"]);
    }

    #[test]
    fn test_buildspec_in_project_resource() {
        let graph = synthesize(sample_config());
        let props = &graph.resource(PROJECT_LOGICAL_ID).unwrap().properties;
        assert_eq!(
            props["Source"]["BuildSpec"],
            serde_json::json!({
                "version": "0.2",
                "phases": {
                    "build": {
                        "commands": [
                            "echo $CODEBUILD_RESOLVED_SOURCE_VERSION",
                            "cat fixfiles/newfile1.md",
                        ]
                    }
                }
            })
        );
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let first = synthesize(sample_config());
        let second = synthesize(sample_config());
        assert_eq!(first, second);
        assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
    }

    #[test]
    fn test_synthesis_from_parsed_config_matches_literal_config() {
        let kdl = r#"
            pipeline "TestPipeline"

            source {
                owner "kaito01234"
                repo "github-branching-strategy"
                branch "production"
                connection "arn:aws:codestar-connections:ap-northeast-1:948669373988:connection/868491e5-ad8b-4ec1-bdb3-43b676d9021b"
            }

            build replicas=3 {
                command "echo $CODEBUILD_RESOLVED_SOURCE_VERSION"
                command "cat fixfiles/newfile1.md"
            }
        "#;
        let parsed = parse_pipeline_config(kdl).unwrap();
        assert_eq!(
            synthesize(parsed).to_json().unwrap(),
            synthesize(sample_config()).to_json().unwrap()
        );
    }

    #[test]
    fn test_tag_filter_in_source_configuration() {
        let mut config = sample_config();
        config.source.tag_filter = Some("v.*-development".to_string());
        let graph = synthesize(config);
        let props = &graph.resource(PIPELINE_LOGICAL_ID).unwrap().properties;
        assert_eq!(
            props["Stages"][0]["Actions"][0]["Configuration"]["TagFilter"],
            "v.*-development"
        );
    }
}
