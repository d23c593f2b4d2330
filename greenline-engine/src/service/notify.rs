//! Approval notification seam

use async_trait::async_trait;
use greenline_client::GatewayClient;

use crate::error::Result;

/// Publishes operator-facing notifications
///
/// Only used when a notification topic is configured; notification failures
/// never fail the stage that emitted them.
#[async_trait]
pub trait ApprovalNotifier: Send + Sync {
    async fn notify(&self, topic: &str, subject: &str, message: &str) -> Result<()>;
}

#[async_trait]
impl ApprovalNotifier for GatewayClient {
    async fn notify(&self, topic: &str, subject: &str, message: &str) -> Result<()> {
        self.publish_notification(topic, subject, message).await?;
        Ok(())
    }
}
