//! Upstream input seams: source bundles, image metadata, task registration

use async_trait::async_trait;
use greenline_client::GatewayClient;
use greenline_core::domain::credential::DelegatedCredential;
use greenline_core::dto::bundle::SourceBundle;

use crate::error::Result;

/// Fetches the source bundle for the revision that triggered the run
///
/// The revision is assumed immutable; a failed fetch is fatal and re-running
/// requires a new trigger.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch(&self, revision: &str) -> Result<SourceBundle>;
}

#[async_trait]
impl SourceFetcher for GatewayClient {
    async fn fetch(&self, revision: &str) -> Result<SourceBundle> {
        Ok(self.fetch_source(revision).await?)
    }
}

/// Fetches the image metadata document for a pushed tag
///
/// The Build stage merges this second upstream input into the deployment
/// descriptor.
#[async_trait]
pub trait ImageRegistry: Send + Sync {
    async fn image_detail(&self, tag: &str) -> Result<serde_json::Value>;
}

#[async_trait]
impl ImageRegistry for GatewayClient {
    async fn image_detail(&self, tag: &str) -> Result<serde_json::Value> {
        Ok(GatewayClient::image_detail(self, tag).await?)
    }
}

/// Registers task definition revisions in the target account
#[async_trait]
pub trait TaskRegistry: Send + Sync {
    /// Register the rendered task definition, returning its identifier
    async fn register(
        &self,
        task_definition: serde_json::Value,
        credential: &DelegatedCredential,
    ) -> Result<String>;
}

#[async_trait]
impl TaskRegistry for GatewayClient {
    async fn register(
        &self,
        task_definition: serde_json::Value,
        credential: &DelegatedCredential,
    ) -> Result<String> {
        let response = self
            .register_task_definition(task_definition, credential)
            .await?;
        Ok(response.task_definition_arn)
    }
}
