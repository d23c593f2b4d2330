//! Credential delegation seam

use async_trait::async_trait;
use greenline_client::GatewayClient;
use greenline_core::domain::credential::DelegatedCredential;
use tracing::debug;

use crate::error::{PipelineError, Result};

/// Obtains short-lived, scoped credentials for acting in a target account
///
/// Nothing is cached across invocations: credentials expire and stages may
/// run on different executors, so every stage re-assumes. Callers keep the
/// returned value for the shortest possible scope; dropping it scrubs the
/// secret material on every exit path.
#[async_trait]
pub trait CredentialBroker: Send + Sync {
    /// Assume the given role under the given session name
    async fn assume(&self, role_arn: &str, session_name: &str) -> Result<DelegatedCredential>;
}

#[async_trait]
impl CredentialBroker for GatewayClient {
    async fn assume(&self, role_arn: &str, session_name: &str) -> Result<DelegatedCredential> {
        debug!("Assuming role {} as {}", role_arn, session_name);

        let grant = self
            .assume_role(role_arn, session_name)
            .await
            .map_err(|e| {
                if e.is_denied() {
                    PipelineError::AssumeRole {
                        role_arn: role_arn.to_string(),
                        message: e.to_string(),
                    }
                } else {
                    PipelineError::Gateway(e)
                }
            })?;

        Ok(DelegatedCredential::new(
            grant.access_key_id,
            grant.secret_access_key,
            grant.session_token,
            grant.expires_at,
        ))
    }
}
