//! Run inspection DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::run::{PipelineRun, RunStatus};
use crate::domain::stage::StageName;

/// Lightweight run representation for list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub id: Uuid,
    pub image_tag: String,
    pub status: RunStatus,
    pub current_stage: Option<StageName>,
    pub deployment_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&PipelineRun> for RunSummary {
    fn from(run: &PipelineRun) -> Self {
        Self {
            id: run.id,
            image_tag: run.image_tag.clone(),
            status: run.status,
            current_stage: run.current_stage,
            deployment_id: run.deployment_id.clone(),
            created_at: run.created_at,
        }
    }
}
