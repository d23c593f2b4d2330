//! Notification topic endpoints

use crate::GatewayClient;
use crate::error::Result;
use greenline_core::dto::gateway::PublishNotificationRequest;

impl GatewayClient {
    /// Publish a message to a notification topic
    ///
    /// Used by the Approval stage when a notification topic is configured;
    /// runs without one skip the publish entirely.
    pub async fn publish_notification(
        &self,
        topic: &str,
        subject: &str,
        message: &str,
    ) -> Result<()> {
        let url = format!("{}/notifications", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&PublishNotificationRequest {
                topic: topic.to_string(),
                subject: subject.to_string(),
                message: message.to_string(),
            })
            .send()
            .await?;

        self.handle_empty_response(response).await
    }
}
