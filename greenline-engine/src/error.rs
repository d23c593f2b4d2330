//! Pipeline error taxonomy
//!
//! No stage retries automatically: every error here halts its run and is
//! surfaced with the originating stage name. Only the rollback path carries
//! any retry-adjacent logic, and that is idempotency tolerance, not retry.

use greenline_core::domain::deployment::DeploymentStatus;
use greenline_core::domain::stage::StageName;
use thiserror::Error;

use greenline_client::ClientError;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can halt a pipeline run
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Credential delegation was denied
    #[error("assuming role {role_arn} was denied: {message}")]
    AssumeRole { role_arn: String, message: String },

    /// An upstream artifact was deleted or never written
    #[error("artifact not found: {0}")]
    ArtifactNotFound(String),

    /// The image metadata document lacks a required field
    #[error("image detail is missing the {field} field")]
    MissingImageDetail { field: &'static str },

    /// A predecessor stage did not export a required variable
    #[error("stage {stage} did not export {name}")]
    MissingExport { stage: StageName, name: String },

    /// The deployment system rejected the creation request
    #[error("deployment creation rejected: {0}")]
    DeploymentCreation(String),

    /// The deployment system reports the deployment as failed
    #[error("deployment {deployment_id} failed with status {status}")]
    DeploymentFailed {
        deployment_id: String,
        status: DeploymentStatus,
    },

    /// Polling or the approval gate exceeded its bound
    #[error("{operation} timed out after {waited_secs}s")]
    Timeout { operation: String, waited_secs: u64 },

    /// The operator rejected the approval gate
    #[error("approval rejected by operator")]
    ApprovalRejected,

    /// No deployment id is persisted; rollback cannot be targeted
    #[error("rollback target missing: no deployment id under {parameter}")]
    RollbackTargetMissing { parameter: String },

    /// A stage artifact could not be encoded or decoded
    #[error("artifact codec failed: {0}")]
    Codec(#[from] serde_json::Error),

    /// Transport-level gateway failure
    #[error("gateway call failed: {0}")]
    Gateway(#[from] ClientError),
}

impl PipelineError {
    /// Short machine-readable error kind, used in logs and events
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::AssumeRole { .. } => "AssumeRoleError",
            PipelineError::ArtifactNotFound(_) => "ArtifactNotFoundError",
            PipelineError::MissingImageDetail { .. } => "MissingImageDetailError",
            PipelineError::MissingExport { .. } => "MissingExportError",
            PipelineError::DeploymentCreation(_) => "DeploymentCreationError",
            PipelineError::DeploymentFailed { .. } => "DeploymentFailed",
            PipelineError::Timeout { .. } => "TimeoutError",
            PipelineError::ApprovalRejected => "ApprovalRejected",
            PipelineError::RollbackTargetMissing { .. } => "RollbackTargetMissing",
            PipelineError::Codec(_) => "CodecError",
            PipelineError::Gateway(_) => "GatewayError",
        }
    }
}
