//! Error types for pipewright.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid connection ARN: {0}")]
    InvalidConnectionArn(String),

    #[error("duplicate stage: {0}")]
    DuplicateStage(String),

    #[error("duplicate action in stage '{stage}': {action}")]
    DuplicateAction { stage: String, action: String },
}

pub type Result<T> = std::result::Result<T, Error>;
