//! Blue/green deployment domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One in-flight blue/green deployment in the target account
///
/// Created by the CreateDeployment stage; only the status changes afterward,
/// driven by the deployment system itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentRecord {
    /// Opaque id issued by the target deployment system
    pub id: String,
    pub application: String,
    pub deployment_group: String,
    pub status: DeploymentStatus,
    pub created_at: DateTime<Utc>,
}

/// Deployment lifecycle status as reported by the deployment system
///
/// `Ready` means the green fleet is provisioned and holding, waiting for the
/// traffic shift to be continued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeploymentStatus {
    Created,
    Queued,
    InProgress,
    Ready,
    Succeeded,
    Failed,
    Stopped,
}

impl DeploymentStatus {
    /// Whether the deployment system reports this deployment as failed
    pub fn is_failed(self) -> bool {
        matches!(self, DeploymentStatus::Failed | DeploymentStatus::Stopped)
    }

    /// Whether the deployment can no longer be stopped
    ///
    /// A stop request against a deployment in one of these states is a no-op
    /// the rollback path treats as success.
    pub fn is_finished(self) -> bool {
        matches!(
            self,
            DeploymentStatus::Succeeded | DeploymentStatus::Failed | DeploymentStatus::Stopped
        )
    }
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeploymentStatus::Created => "Created",
            DeploymentStatus::Queued => "Queued",
            DeploymentStatus::InProgress => "InProgress",
            DeploymentStatus::Ready => "Ready",
            DeploymentStatus::Succeeded => "Succeeded",
            DeploymentStatus::Failed => "Failed",
            DeploymentStatus::Stopped => "Stopped",
        };
        f.write_str(s)
    }
}
