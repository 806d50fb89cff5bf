//! Synthesis errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SynthError {
    #[error("invalid pipeline definition: {0}")]
    Definition(#[from] pipewright_core::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type SynthResult<T> = std::result::Result<T, SynthError>;
