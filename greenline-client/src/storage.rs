//! Artifact bucket and parameter store endpoints

use crate::GatewayClient;
use crate::error::{ClientError, Result};
use greenline_core::domain::credential::DelegatedCredential;
use greenline_core::dto::gateway::{ParameterValue, PutParameterRequest};

impl GatewayClient {
    // =============================================================================
    // Artifact bucket
    // =============================================================================

    /// Write an object into the encrypted cross-account artifact bucket
    ///
    /// # Arguments
    /// * `key` - Bucket-relative object key
    /// * `body` - Object content
    pub async fn put_artifact(&self, key: &str, body: Vec<u8>) -> Result<()> {
        let url = format!("{}/artifacts/{}", self.base_url, key);
        let response = self.client.put(&url).body(body).send().await?;

        self.handle_empty_response(response).await
    }

    /// Read an object from the artifact bucket
    ///
    /// A deleted or never-written key surfaces as `NotFound`.
    pub async fn get_artifact(&self, key: &str) -> Result<Vec<u8>> {
        let url = format!("{}/artifacts/{}", self.base_url, key);
        let response = self.client.get(&url).send().await?;

        match self.handle_bytes_response(response).await {
            Err(e) if e.is_not_found() => Err(ClientError::NotFound(key.to_string())),
            other => other,
        }
    }

    // =============================================================================
    // Parameter store
    // =============================================================================

    /// Write a parameter, overwriting any previous value
    ///
    /// # Arguments
    /// * `name` - Namespaced parameter name (e.g. "/myapp/DeploymentId")
    /// * `value` - Parameter value
    /// * `credential` - Delegated credential for the target account
    pub async fn put_parameter(
        &self,
        name: &str,
        value: &str,
        credential: &DelegatedCredential,
    ) -> Result<()> {
        let url = format!("{}/parameters", self.base_url);
        let request = self.client.post(&url).json(&PutParameterRequest {
            name: name.to_string(),
            value: value.to_string(),
        });
        let response = self.delegated(request, credential).send().await?;

        self.handle_empty_response(response).await
    }

    /// Read a parameter by name
    pub async fn get_parameter(
        &self,
        name: &str,
        credential: &DelegatedCredential,
    ) -> Result<ParameterValue> {
        let url = format!("{}/parameters", self.base_url);
        let request = self.client.get(&url).query(&[("name", name)]);
        let response = self.delegated(request, credential).send().await?;

        match self.handle_response(response).await {
            Err(e) if e.is_not_found() => Err(ClientError::NotFound(name.to_string())),
            other => other,
        }
    }
}
