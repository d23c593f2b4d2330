//! Pipeline run domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::stage::{StageName, StageResult};

/// One execution of the deployment pipeline
///
/// Created when a release-candidate image push is accepted, mutated as stages
/// complete, terminal on Succeeded/Failed/RolledBack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRun {
    pub id: Uuid,
    /// Image tag that triggered the run (release-candidate pattern)
    pub image_tag: String,
    /// Source revision the deployment descriptors are fetched from
    pub source_revision: String,
    /// Fully qualified registry reference of the image being deployed
    pub image_uri: String,
    pub status: RunStatus,
    pub current_stage: Option<StageName>,
    pub stage_results: Vec<StageResult>,
    /// Deployment id exported by CreateDeployment; written exactly once
    pub deployment_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Overall run status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Running,
    WaitingApproval,
    Succeeded,
    Failed,
    RolledBack,
}

impl RunStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RunStatus::Succeeded | RunStatus::Failed | RunStatus::RolledBack
        )
    }
}

impl PipelineRun {
    pub fn new(
        image_tag: impl Into<String>,
        source_revision: impl Into<String>,
        image_uri: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            image_tag: image_tag.into(),
            source_revision: source_revision.into(),
            image_uri: image_uri.into(),
            status: RunStatus::Running,
            current_stage: None,
            stage_results: Vec::new(),
            deployment_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The recorded result for a stage, if it has finished
    pub fn stage_result(&self, stage: StageName) -> Option<&StageResult> {
        self.stage_results.iter().find(|r| r.stage == stage)
    }

    /// Records a finished stage
    ///
    /// The deployment id is immutable after publish: the first stage result
    /// that exports one pins it for the rest of the run.
    pub fn record_stage(&mut self, result: StageResult) {
        if self.deployment_id.is_none() {
            if let Some(id) = result.deployment_id() {
                self.deployment_id = Some(id.to_string());
            }
        }
        self.stage_results.push(result);
        self.updated_at = Utc::now();
    }
}
