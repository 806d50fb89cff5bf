//! Artifact handles.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// An opaque named handle for data passed between pipeline stages.
///
/// The artifact carries no content at definition time; the external pipeline
/// engine materializes it when the producing action runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{name}")]
pub struct Artifact {
    name: String,
}

impl Artifact {
    /// Create an artifact handle with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The artifact name as referenced by actions.
    pub fn name(&self) -> &str {
        &self.name
    }
}
