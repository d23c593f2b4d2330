//! Pipeline trigger DTOs

use serde::{Deserialize, Serialize};

/// Marker that distinguishes release-candidate image tags
const RELEASE_CANDIDATE_MARKER: &str = "rc-";

/// Image push event delivered by the registry
///
/// Only identifiers matching the release-candidate pattern start a pipeline
/// run; anything else is logged and ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagePushEvent {
    /// Registry repository the image was pushed to
    pub repository: String,
    /// Tag of the pushed image (e.g. "rc-42")
    pub image_tag: String,
    /// Fully qualified image reference (e.g. "registry/app:rc-42")
    pub image_uri: String,
    /// Source revision the tag was built from
    pub source_revision: String,
}

/// Outcome of submitting an image push event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerResponse {
    /// Whether a pipeline run was started
    pub accepted: bool,
    /// Id of the started run, when accepted
    pub run_id: Option<uuid::Uuid>,
}

impl ImagePushEvent {
    /// Whether this event should start a deployment pipeline
    ///
    /// Case-insensitive match on the "rc-" marker, as the original trigger
    /// filter behaves.
    pub fn is_release_candidate(&self) -> bool {
        self.image_tag
            .to_ascii_lowercase()
            .contains(RELEASE_CANDIDATE_MARKER)
    }
}
