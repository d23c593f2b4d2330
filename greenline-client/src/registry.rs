//! Compute registry endpoints

use crate::GatewayClient;
use crate::error::Result;
use greenline_core::domain::credential::DelegatedCredential;
use greenline_core::dto::gateway::{RegisterTaskDefinitionRequest, TaskDefinitionArn};

impl GatewayClient {
    /// Fetch the image detail document for a pushed tag
    ///
    /// Returned as raw JSON; the Build stage extracts the `ImageURI` field
    /// and treats its absence as fatal.
    ///
    /// # Arguments
    /// * `tag` - Image tag from the trigger event
    pub async fn image_detail(&self, tag: &str) -> Result<serde_json::Value> {
        let url = format!("{}/images/{}", self.base_url, tag);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Register a new task definition revision in the target account
    ///
    /// # Arguments
    /// * `task_definition` - The rendered task definition document
    /// * `credential` - Delegated credential for the target account
    pub async fn register_task_definition(
        &self,
        task_definition: serde_json::Value,
        credential: &DelegatedCredential,
    ) -> Result<TaskDefinitionArn> {
        let url = format!("{}/task-definitions", self.base_url);
        let request = self
            .client
            .post(&url)
            .json(&RegisterTaskDefinitionRequest { task_definition });
        let response = self.delegated(request, credential).send().await?;

        self.handle_response(response).await
    }
}
