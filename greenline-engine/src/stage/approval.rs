//! Approval stage
//!
//! Suspends the run until an operator decides, optionally notifying a topic
//! first. Rejection and timeout both fail the run; rejecting the gate is the
//! only user-initiated cancellation path and always routes through rollback.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use greenline_core::domain::approval::ApprovalDecision;
use greenline_core::domain::stage::{StageName, StageResult};
use tracing::{info, warn};

use crate::approval::ApprovalRegistry;
use crate::error::{PipelineError, Result};
use crate::stage::{Stage, StageContext};

pub struct ApprovalStage {
    approvals: Arc<ApprovalRegistry>,
}

impl ApprovalStage {
    pub fn new(approvals: Arc<ApprovalRegistry>) -> Self {
        Self { approvals }
    }
}

#[async_trait]
impl Stage for ApprovalStage {
    fn name(&self) -> StageName {
        StageName::Approval
    }

    async fn run(&self, ctx: &StageContext<'_>) -> Result<StageResult> {
        let started = Utc::now();
        let gate = self.approvals.register(ctx.run.id);

        if let Some(topic) = &ctx.config.notification_topic {
            let subject = format!(
                "Approval required: {} {} deployment",
                ctx.config.app_name, ctx.config.stage_name
            );
            let message = format!(
                "Run {} is holding before the traffic shift for image {}. \
                 Approve to reroute traffic or reject to roll back.",
                ctx.run.id, ctx.run.image_uri
            );
            // Best effort: the gate still works if the notification fails.
            if let Err(e) = ctx.services.notifier.notify(topic, &subject, &message).await {
                warn!("Approval notification failed: {}", e);
            }
        }

        info!("Run {} waiting for operator approval", ctx.run.id);

        match tokio::time::timeout(ctx.config.approval_timeout, gate).await {
            Ok(Ok(ApprovalDecision::Approved)) => {
                info!("Run {} approved", ctx.run.id);
                Ok(StageResult::succeeded(StageName::Approval, started))
            }
            Ok(Ok(ApprovalDecision::Rejected)) => Err(PipelineError::ApprovalRejected),
            // A dropped gate counts as rejection.
            Ok(Err(_)) => Err(PipelineError::ApprovalRejected),
            Err(_) => {
                self.approvals.abandon(ctx.run.id);
                Err(PipelineError::Timeout {
                    operation: format!("approval for run {}", ctx.run.id),
                    waited_secs: ctx.config.approval_timeout.as_secs(),
                })
            }
        }
    }
}
