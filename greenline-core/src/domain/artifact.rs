//! Stage artifact references

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::domain::stage::StageName;

/// Reference to a durable stage output
///
/// The underlying object lives in the encrypted cross-account artifact
/// bucket; the key is derived from the run, the producing stage, and the
/// artifact name, so references are content-addressable per pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRef {
    pub run_id: Uuid,
    pub stage: StageName,
    pub name: String,
}

impl ArtifactRef {
    pub fn new(run_id: Uuid, stage: StageName, name: impl Into<String>) -> Self {
        Self {
            run_id,
            stage,
            name: name.into(),
        }
    }

    /// The bucket-relative object key for this artifact
    pub fn object_key(&self) -> String {
        format!("runs/{}/{}/{}", self.run_id, self.stage, self.name)
    }
}

impl fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.object_key())
    }
}
