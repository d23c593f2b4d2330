//! Deployment service endpoints

use crate::GatewayClient;
use crate::error::Result;
use greenline_core::domain::credential::DelegatedCredential;
use greenline_core::dto::gateway::{
    CreateDeploymentRequest, CreateDeploymentResponse, DeploymentInfo, StopDeploymentRequest,
};

impl GatewayClient {
    /// Create a blue/green deployment from a published bundle
    ///
    /// # Arguments
    /// * `req` - Application, deployment group, and bundle key
    /// * `credential` - Delegated credential for the target account
    ///
    /// # Returns
    /// The deployment id issued by the deployment system
    pub async fn create_deployment(
        &self,
        req: CreateDeploymentRequest,
        credential: &DelegatedCredential,
    ) -> Result<CreateDeploymentResponse> {
        tracing::debug!(
            "Creating deployment for {}/{}",
            req.application,
            req.deployment_group
        );

        let url = format!("{}/deployments", self.base_url);
        let request = self.client.post(&url).json(&req);
        let response = self.delegated(request, credential).send().await?;

        self.handle_response(response).await
    }

    /// Query the current status of a deployment
    pub async fn get_deployment(
        &self,
        deployment_id: &str,
        credential: &DelegatedCredential,
    ) -> Result<DeploymentInfo> {
        let url = format!("{}/deployments/{}", self.base_url, deployment_id);
        let request = self.client.get(&url);
        let response = self.delegated(request, credential).send().await?;

        self.handle_response(response).await
    }

    /// Resume a deployment that is holding in the Ready state
    ///
    /// This completes the traffic shift from the blue to the green target
    /// group.
    pub async fn continue_deployment(
        &self,
        deployment_id: &str,
        credential: &DelegatedCredential,
    ) -> Result<()> {
        tracing::debug!("Continuing deployment {}", deployment_id);

        let url = format!("{}/deployments/{}/continue", self.base_url, deployment_id);
        let request = self.client.post(&url);
        let response = self.delegated(request, credential).send().await?;

        self.handle_empty_response(response).await
    }

    /// Stop a deployment
    ///
    /// With `auto_rollback` set, the deployment system reverts traffic to the
    /// blue target group. Stopping a deployment that already reached a
    /// terminal state yields a 409; callers check `is_conflict()` and treat
    /// it as "nothing left to stop".
    pub async fn stop_deployment(
        &self,
        deployment_id: &str,
        auto_rollback: bool,
        credential: &DelegatedCredential,
    ) -> Result<()> {
        tracing::debug!(
            "Stopping deployment {} (auto_rollback={})",
            deployment_id,
            auto_rollback
        );

        let url = format!("{}/deployments/{}/stop", self.base_url, deployment_id);
        let request = self
            .client
            .post(&url)
            .json(&StopDeploymentRequest { auto_rollback });
        let response = self.delegated(request, credential).send().await?;

        self.handle_empty_response(response).await
    }
}
