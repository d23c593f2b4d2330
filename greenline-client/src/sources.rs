//! Source repository endpoints

use crate::GatewayClient;
use crate::error::Result;
use greenline_core::dto::bundle::SourceBundle;

impl GatewayClient {
    /// Fetch the source bundle for a revision
    ///
    /// The bundle holds the deployment descriptor templates (task definition
    /// and appspec) committed at that revision. 404 means the revision does
    /// not exist; the trigger is assumed immutable, so the caller does not
    /// retry.
    ///
    /// # Arguments
    /// * `revision` - Source revision identifier from the trigger event
    pub async fn fetch_source(&self, revision: &str) -> Result<SourceBundle> {
        let url = format!("{}/sources/{}", self.base_url, revision);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }
}
