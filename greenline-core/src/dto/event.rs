//! Observable run events
//!
//! Every stage entry and exit is emitted as an event so rollback and external
//! monitoring can react without polling the controller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::stage::{StageName, StageStatus};

/// Whether the event marks a stage entry or exit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventPhase {
    Entered,
    Exited,
}

/// One stage transition of one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunEvent {
    pub run_id: Uuid,
    pub stage: StageName,
    pub phase: EventPhase,
    pub status: StageStatus,
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl RunEvent {
    pub fn entered(run_id: Uuid, stage: StageName) -> Self {
        Self {
            run_id,
            stage,
            phase: EventPhase::Entered,
            status: StageStatus::Running,
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn exited(run_id: Uuid, stage: StageName, status: StageStatus) -> Self {
        Self {
            run_id,
            stage,
            phase: EventPhase::Exited,
            status,
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Whether this event must initiate a rollback
    pub fn requires_rollback(&self) -> bool {
        self.phase == EventPhase::Exited
            && self.status == StageStatus::Failed
            && self.stage.triggers_rollback()
    }
}
