//! Pipeline and stage definitions.

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::{Error, Result};

/// A delivery-pipeline definition.
///
/// The pipeline only declares structure; the external orchestration service
/// owns execution, queuing and artifact passing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    /// Pipeline name.
    pub name: String,
    /// Stages in execution order.
    pub stages: Vec<Stage>,
    /// Provision cross-account encryption keys.
    pub cross_account_keys: bool,
    /// Rotate the pipeline's encryption key.
    pub enable_key_rotation: bool,
}

impl Pipeline {
    /// Create an empty pipeline. Both key flags default to off.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stages: Vec::new(),
            cross_account_keys: false,
            enable_key_rotation: false,
        }
    }

    /// Append a stage. Stage names must be unique within the pipeline, and
    /// action names unique within the stage.
    pub fn add_stage(&mut self, stage: Stage) -> Result<()> {
        if self.stages.iter().any(|s| s.name == stage.name) {
            return Err(Error::DuplicateStage(stage.name));
        }
        for (i, action) in stage.actions.iter().enumerate() {
            if stage.actions[..i].iter().any(|a| a.name() == action.name()) {
                return Err(Error::DuplicateAction {
                    stage: stage.name,
                    action: action.name().to_string(),
                });
            }
        }
        self.stages.push(stage);
        Ok(())
    }

    /// Look up a stage by name.
    pub fn stage(&self, name: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.name == name)
    }
}

/// A named, ordered group of actions executed as a unit within a pipeline.
///
/// Each stage owns its action list. Building two stages from the same
/// actions copies them; there is no sharing between stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    /// Stage name.
    pub name: String,
    /// Actions within the stage.
    pub actions: Vec<Action>,
}

impl Stage {
    pub fn new(name: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            name: name.into(),
            actions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Artifact, BuildAction};

    fn build_action(name: &str) -> Action {
        Action::Build(BuildAction {
            name: name.to_string(),
            project: "proj".to_string(),
            input: Artifact::named("src"),
        })
    }

    #[test]
    fn test_stage_order_preserved() {
        let mut pipeline = Pipeline::new("p");
        pipeline.add_stage(Stage::new("Source", vec![])).unwrap();
        pipeline.add_stage(Stage::new("Build", vec![])).unwrap();
        pipeline.add_stage(Stage::new("Deploy", vec![])).unwrap();

        let names: Vec<&str> = pipeline.stages.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Source", "Build", "Deploy"]);
    }

    #[test]
    fn test_reject_duplicate_stage() {
        let mut pipeline = Pipeline::new("p");
        pipeline.add_stage(Stage::new("Build", vec![])).unwrap();
        let err = pipeline.add_stage(Stage::new("Build", vec![])).unwrap_err();
        assert!(matches!(err, Error::DuplicateStage(_)));
    }

    #[test]
    fn test_reject_duplicate_action_in_stage() {
        let mut pipeline = Pipeline::new("p");
        let stage = Stage::new("Build", vec![build_action("Build-0"), build_action("Build-0")]);
        let err = pipeline.add_stage(stage).unwrap_err();
        assert!(matches!(err, Error::DuplicateAction { .. }));
    }

    #[test]
    fn test_stages_own_their_actions() {
        let actions = vec![build_action("Build-0")];
        let mut pipeline = Pipeline::new("p");
        pipeline
            .add_stage(Stage::new("Build", actions.clone()))
            .unwrap();
        pipeline.add_stage(Stage::new("Deploy", actions)).unwrap();

        // Equal content, distinct storage.
        assert_eq!(
            pipeline.stage("Build").unwrap().actions,
            pipeline.stage("Deploy").unwrap().actions
        );
    }
}
