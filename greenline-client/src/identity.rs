//! Identity service endpoints

use crate::GatewayClient;
use crate::error::Result;
use greenline_core::dto::gateway::{AssumeRoleRequest, CredentialGrant};

impl GatewayClient {
    /// Assume a target-account role and obtain short-lived credentials
    ///
    /// Fails with a 403-class error when the caller lacks permission on the
    /// role or the role's trust policy rejects the caller. Nothing is cached:
    /// every call performs a fresh exchange.
    ///
    /// # Arguments
    /// * `role_arn` - ARN of the role to assume
    /// * `session_name` - Session name recorded in the target account's audit trail
    pub async fn assume_role(&self, role_arn: &str, session_name: &str) -> Result<CredentialGrant> {
        let url = format!("{}/sts/assume-role", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&AssumeRoleRequest {
                role_arn: role_arn.to_string(),
                session_name: session_name.to_string(),
            })
            .send()
            .await?;

        self.handle_response(response).await
    }
}
