//! Artifact and parameter storage seams

use async_trait::async_trait;
use greenline_client::GatewayClient;
use greenline_core::domain::artifact::ArtifactRef;
use greenline_core::domain::credential::DelegatedCredential;
use greenline_core::domain::stage::StageName;
use uuid::Uuid;

use crate::error::{PipelineError, Result};

/// Content-addressable holder for stage outputs
///
/// Objects live in the encrypted cross-account bucket; both the pipeline's
/// home account and the target deployment account can read them. Stages read
/// predecessor outputs and write their own.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Write a stage output keyed by run and stage, returning its reference
    async fn put(
        &self,
        run_id: Uuid,
        stage: StageName,
        name: &str,
        body: Vec<u8>,
    ) -> Result<ArtifactRef>;

    /// Read a stage output
    ///
    /// A reference whose object was deleted or never written fails with
    /// `ArtifactNotFound`; the controller halts and does not retry.
    async fn get(&self, artifact: &ArtifactRef) -> Result<Vec<u8>>;

    /// Write an object at a caller-derived key
    ///
    /// Used for the deployment-system-visible bundle copy, whose key the
    /// deployment service is pointed at.
    async fn publish(&self, key: &str, body: Vec<u8>) -> Result<()>;
}

#[async_trait]
impl ArtifactStore for GatewayClient {
    async fn put(
        &self,
        run_id: Uuid,
        stage: StageName,
        name: &str,
        body: Vec<u8>,
    ) -> Result<ArtifactRef> {
        let artifact = ArtifactRef::new(run_id, stage, name);
        self.put_artifact(&artifact.object_key(), body).await?;
        Ok(artifact)
    }

    async fn get(&self, artifact: &ArtifactRef) -> Result<Vec<u8>> {
        let key = artifact.object_key();
        self.get_artifact(&key).await.map_err(|e| {
            if e.is_not_found() {
                PipelineError::ArtifactNotFound(key)
            } else {
                PipelineError::Gateway(e)
            }
        })
    }

    async fn publish(&self, key: &str, body: Vec<u8>) -> Result<()> {
        self.put_artifact(key, body).await?;
        Ok(())
    }
}

/// Shared parameter store in the target account
///
/// The durability channel for the deployment id: written by CreateDeployment,
/// read by rollback, surviving controller restarts.
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Write a parameter, overwriting any previous value
    async fn put(&self, name: &str, value: &str, credential: &DelegatedCredential) -> Result<()>;

    /// Read a parameter; `None` when it was never written
    async fn get(&self, name: &str, credential: &DelegatedCredential) -> Result<Option<String>>;
}

#[async_trait]
impl ParameterStore for GatewayClient {
    async fn put(&self, name: &str, value: &str, credential: &DelegatedCredential) -> Result<()> {
        self.put_parameter(name, value, credential).await?;
        Ok(())
    }

    async fn get(&self, name: &str, credential: &DelegatedCredential) -> Result<Option<String>> {
        match self.get_parameter(name, credential).await {
            Ok(parameter) => Ok(Some(parameter.value)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(PipelineError::Gateway(e)),
        }
    }
}
