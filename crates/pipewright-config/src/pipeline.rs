//! Pipeline configuration parsing.

use crate::{ConfigError, ConfigResult};
use kdl::{KdlDocument, KdlNode};
use pipewright_core::ConnectionArn;
use serde::{Deserialize, Serialize};

/// Default number of build-action replicas when the config omits `replicas`.
pub const DEFAULT_REPLICAS: u32 = 3;

/// Parsed pipeline configuration.
///
/// Every value here was a hard-coded literal in earlier revisions of the
/// pipeline definition; the config file is the injection point for all of
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Pipeline name.
    pub name: String,
    /// Source stage parameters.
    pub source: SourceConfig,
    /// Build stage parameters.
    pub build: BuildConfig,
    /// Deploy stage behavior.
    pub deploy: DeployMode,
    /// Provision cross-account encryption keys.
    pub cross_account_keys: bool,
    /// Rotate the pipeline's encryption key.
    pub enable_key_rotation: bool,
}

/// Source stage parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Branch to fetch.
    pub branch: String,
    /// Connection credential reference.
    pub connection: ConnectionArn,
    /// Start the pipeline automatically on push.
    pub trigger_on_push: bool,
    /// Optional tag pattern restricting push triggers.
    pub tag_filter: Option<String>,
}

/// Build stage parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Number of identical build actions to declare.
    pub replicas: u32,
    /// Commands the build project runs, in order.
    pub commands: Vec<String>,
}

/// What the Deploy stage contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeployMode {
    /// Deploy declares copies of the Build stage's actions. This reproduces
    /// the original configuration; the builder flags it at synthesis time.
    ReuseBuildActions,
    /// Deploy declares no actions.
    None,
}

/// Parse a pipeline configuration from KDL text.
pub fn parse_pipeline_config(kdl: &str) -> ConfigResult<PipelineConfig> {
    let doc: KdlDocument = kdl.parse()?;

    let mut name = String::new();
    let mut cross_account_keys = false;
    let mut enable_key_rotation = false;
    let mut source = None;
    let mut build = None;
    let mut deploy = DeployMode::ReuseBuildActions;

    for node in doc.nodes() {
        match node.name().value() {
            "pipeline" => {
                name = get_first_string_arg(node)
                    .ok_or_else(|| ConfigError::MissingField("pipeline name".to_string()))?;
                cross_account_keys =
                    get_bool_prop(node, "cross-account-keys").unwrap_or(false);
                enable_key_rotation =
                    get_bool_prop(node, "enable-key-rotation").unwrap_or(false);
            }
            "source" => {
                if source.is_some() {
                    return Err(ConfigError::Duplicate("source".to_string()));
                }
                source = Some(parse_source(node)?);
            }
            "build" => {
                if build.is_some() {
                    return Err(ConfigError::Duplicate("build".to_string()));
                }
                build = Some(parse_build(node)?);
            }
            "deploy" => {
                deploy = parse_deploy(node)?;
            }
            _ => {} // Ignore unknown nodes
        }
    }

    if name.is_empty() {
        return Err(ConfigError::MissingField("pipeline name".to_string()));
    }
    let source = source.ok_or_else(|| ConfigError::MissingField("source".to_string()))?;
    let build = build.ok_or_else(|| ConfigError::MissingField("build".to_string()))?;

    Ok(PipelineConfig {
        name,
        source,
        build,
        deploy,
        cross_account_keys,
        enable_key_rotation,
    })
}

fn parse_source(node: &KdlNode) -> ConfigResult<SourceConfig> {
    let mut owner = None;
    let mut repo = None;
    let mut branch = None;
    let mut connection = None;
    let mut trigger_on_push = true;
    let mut tag_filter = None;

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "owner" => owner = get_first_string_arg(child),
                "repo" => repo = get_first_string_arg(child),
                "branch" => branch = get_first_string_arg(child),
                "connection" => connection = get_first_string_arg(child),
                "trigger-on-push" => {
                    trigger_on_push = get_first_bool_arg(child).unwrap_or(true);
                }
                "tag-filter" => tag_filter = get_first_string_arg(child),
                _ => {}
            }
        }
    }

    let connection = connection
        .ok_or_else(|| ConfigError::MissingField("source connection".to_string()))?;
    let connection =
        ConnectionArn::parse(connection).map_err(|e| ConfigError::InvalidValue {
            field: "source connection".to_string(),
            message: e.to_string(),
        })?;

    Ok(SourceConfig {
        owner: owner.ok_or_else(|| ConfigError::MissingField("source owner".to_string()))?,
        repo: repo.ok_or_else(|| ConfigError::MissingField("source repo".to_string()))?,
        branch: branch
            .ok_or_else(|| ConfigError::MissingField("source branch".to_string()))?,
        connection,
        trigger_on_push,
        tag_filter,
    })
}

fn parse_build(node: &KdlNode) -> ConfigResult<BuildConfig> {
    let replicas = match get_int_prop(node, "replicas") {
        Some(n) if n > 0 => n as u32,
        Some(n) => {
            return Err(ConfigError::InvalidValue {
                field: "build replicas".to_string(),
                message: format!("must be at least 1, got {}", n),
            });
        }
        None => DEFAULT_REPLICAS,
    };

    let mut commands = Vec::new();
    if let Some(children) = node.children() {
        for child in children.nodes() {
            if child.name().value() == "command" {
                if let Some(cmd) = get_first_string_arg(child) {
                    commands.push(cmd);
                }
            }
        }
    }

    if commands.is_empty() {
        return Err(ConfigError::MissingField("build commands".to_string()));
    }

    Ok(BuildConfig { replicas, commands })
}

fn parse_deploy(node: &KdlNode) -> ConfigResult<DeployMode> {
    let mode = get_string_prop(node, "mode")
        .or_else(|| get_first_string_arg(node))
        .unwrap_or_else(|| "reuse-build-actions".to_string());

    match mode.as_str() {
        "reuse-build-actions" => Ok(DeployMode::ReuseBuildActions),
        "none" => Ok(DeployMode::None),
        other => Err(ConfigError::InvalidValue {
            field: "deploy mode".to_string(),
            message: format!("unknown deploy mode: {}", other),
        }),
    }
}

// Helper functions for extracting values from KDL nodes

fn get_first_string_arg(node: &KdlNode) -> Option<String> {
    node.entries()
        .iter()
        .find(|e| e.name().is_none())
        .and_then(|e| e.value().as_string())
        .map(|s| s.to_string())
}

fn get_first_bool_arg(node: &KdlNode) -> Option<bool> {
    node.entries()
        .iter()
        .find(|e| e.name().is_none())
        .and_then(|e| e.value().as_bool())
}

fn get_string_prop(node: &KdlNode, name: &str) -> Option<String> {
    node.get(name)
        .and_then(|v| v.as_string())
        .map(|s| s.to_string())
}

fn get_bool_prop(node: &KdlNode, name: &str) -> Option<bool> {
    node.get(name).and_then(|v| v.as_bool())
}

fn get_int_prop(node: &KdlNode, name: &str) -> Option<i128> {
    node.get(name).and_then(|v| v.as_integer())
}
