//! Deployment service seam

use async_trait::async_trait;
use chrono::Utc;
use greenline_client::GatewayClient;
use greenline_core::domain::credential::DelegatedCredential;
use greenline_core::domain::deployment::{DeploymentRecord, DeploymentStatus};
use greenline_core::dto::gateway::CreateDeploymentRequest;

use crate::error::{PipelineError, Result};

/// Outcome of a stop-deployment request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// The deployment was stopped and traffic reverted
    Stopped,
    /// The deployment was already in a terminal state; nothing to stop
    AlreadyFinished,
}

/// Blue/green deployment operations in the target account
///
/// Every call takes the delegated credential explicitly; the deployment
/// system is never addressed with ambient identity.
#[async_trait]
pub trait DeployApi: Send + Sync {
    /// Create a deployment from a published bundle
    async fn create(
        &self,
        application: &str,
        deployment_group: &str,
        bundle_key: &str,
        credential: &DelegatedCredential,
    ) -> Result<DeploymentRecord>;

    /// Query the current deployment status
    async fn status(
        &self,
        deployment_id: &str,
        credential: &DelegatedCredential,
    ) -> Result<DeploymentStatus>;

    /// Resume a deployment holding in Ready, completing the traffic shift
    async fn resume(&self, deployment_id: &str, credential: &DelegatedCredential) -> Result<()>;

    /// Stop a deployment, reverting traffic when `auto_rollback` is set
    ///
    /// Stopping an already-finished deployment is not an error; it reports
    /// [`StopOutcome::AlreadyFinished`].
    async fn stop(
        &self,
        deployment_id: &str,
        auto_rollback: bool,
        credential: &DelegatedCredential,
    ) -> Result<StopOutcome>;
}

#[async_trait]
impl DeployApi for GatewayClient {
    async fn create(
        &self,
        application: &str,
        deployment_group: &str,
        bundle_key: &str,
        credential: &DelegatedCredential,
    ) -> Result<DeploymentRecord> {
        let response = self
            .create_deployment(
                CreateDeploymentRequest {
                    application: application.to_string(),
                    deployment_group: deployment_group.to_string(),
                    bundle_key: bundle_key.to_string(),
                },
                credential,
            )
            .await
            .map_err(|e| match e {
                greenline_client::ClientError::ApiError { status, message }
                    if (400..500).contains(&status) =>
                {
                    PipelineError::DeploymentCreation(message)
                }
                other => PipelineError::Gateway(other),
            })?;

        Ok(DeploymentRecord {
            id: response.deployment_id,
            application: application.to_string(),
            deployment_group: deployment_group.to_string(),
            status: DeploymentStatus::Created,
            created_at: Utc::now(),
        })
    }

    async fn status(
        &self,
        deployment_id: &str,
        credential: &DelegatedCredential,
    ) -> Result<DeploymentStatus> {
        let info = self.get_deployment(deployment_id, credential).await?;
        Ok(info.status)
    }

    async fn resume(&self, deployment_id: &str, credential: &DelegatedCredential) -> Result<()> {
        self.continue_deployment(deployment_id, credential).await?;
        Ok(())
    }

    async fn stop(
        &self,
        deployment_id: &str,
        auto_rollback: bool,
        credential: &DelegatedCredential,
    ) -> Result<StopOutcome> {
        match self
            .stop_deployment(deployment_id, auto_rollback, credential)
            .await
        {
            Ok(()) => Ok(StopOutcome::Stopped),
            Err(e) if e.is_conflict() => Ok(StopOutcome::AlreadyFinished),
            Err(e) => Err(PipelineError::Gateway(e)),
        }
    }
}
