//! RerouteTraffic stage
//!
//! Resumes the deployment created earlier in the run, completing the shift
//! from the blue to the green target group. The deployment id arrives only
//! through the CreateDeployment stage's exported variable.

use async_trait::async_trait;
use chrono::Utc;
use greenline_core::domain::stage::{DEPLOYMENT_ID_EXPORT, StageName, StageResult};
use tracing::info;

use crate::error::{PipelineError, Result};
use crate::stage::{Stage, StageContext};

pub struct RerouteTrafficStage;

#[async_trait]
impl Stage for RerouteTrafficStage {
    fn name(&self) -> StageName {
        StageName::RerouteTraffic
    }

    async fn run(&self, ctx: &StageContext<'_>) -> Result<StageResult> {
        let started = Utc::now();

        let deployment_id = ctx
            .run
            .stage_result(StageName::CreateDeployment)
            .and_then(|result| result.deployment_id())
            .ok_or_else(|| PipelineError::MissingExport {
                stage: StageName::CreateDeployment,
                name: DEPLOYMENT_ID_EXPORT.to_string(),
            })?
            .to_string();

        let credential = ctx
            .services
            .credentials
            .assume(&ctx.config.deployer_role_arn, "reroute-traffic")
            .await?;

        info!("Resuming deployment {} to shift traffic", deployment_id);
        ctx.services.deploy.resume(&deployment_id, &credential).await?;

        Ok(StageResult::succeeded(StageName::RerouteTraffic, started)
            .with_export(DEPLOYMENT_ID_EXPORT, deployment_id))
    }
}
