//! CreateDeployment stage
//!
//! Publishes the rendered bundle, registers the blue/green deployment,
//! persists its id out-of-band for the rollback path, and polls until the
//! deployment is ready to shift traffic.

use async_trait::async_trait;
use chrono::Utc;
use greenline_core::domain::stage::{DEPLOYMENT_ID_EXPORT, StageName, StageResult};
use tracing::info;

use crate::error::{PipelineError, Result};
use crate::poller::DeploymentStatusPoller;
use crate::stage::build::APPSPEC_ARTIFACT;
use crate::stage::{Stage, StageContext};

pub struct CreateDeploymentStage;

#[async_trait]
impl Stage for CreateDeploymentStage {
    fn name(&self) -> StageName {
        StageName::CreateDeployment
    }

    async fn run(&self, ctx: &StageContext<'_>) -> Result<StageResult> {
        let started = Utc::now();

        let build = ctx.run.stage_result(StageName::Build).ok_or_else(|| {
            PipelineError::MissingExport {
                stage: StageName::Build,
                name: APPSPEC_ARTIFACT.to_string(),
            }
        })?;
        let appspec_ref = build.artifact(APPSPEC_ARTIFACT).ok_or_else(|| {
            PipelineError::ArtifactNotFound(format!("Build produced no {}", APPSPEC_ARTIFACT))
        })?;
        let appspec = ctx.services.artifacts.get(appspec_ref).await?;

        let credential = ctx
            .services
            .credentials
            .assume(&ctx.config.deployer_role_arn, "create-deployment")
            .await?;

        // Working copy under this stage's own key, plus the copy the
        // deployment system is pointed at, under a key derived from it.
        let working = ctx
            .services
            .artifacts
            .put(
                ctx.run.id,
                StageName::CreateDeployment,
                "bundle",
                appspec.clone(),
            )
            .await?;
        let bundle_key = format!("{}/appspec.yml", working.object_key());
        ctx.services.artifacts.publish(&bundle_key, appspec).await?;

        let deployment = ctx
            .services
            .deploy
            .create(
                &ctx.config.deploy_application,
                &ctx.config.deploy_group,
                &bundle_key,
                &credential,
            )
            .await?;
        let deployment_id = deployment.id;

        info!(
            "Created deployment {} for {}/{}",
            deployment_id, deployment.application, deployment.deployment_group
        );

        // Persisted before polling: if anything goes wrong from here on,
        // rollback must still be able to find its target.
        ctx.services
            .parameters
            .put(
                &ctx.config.deployment_id_parameter(),
                &deployment_id,
                &credential,
            )
            .await?;

        let poller = DeploymentStatusPoller::new(
            ctx.services.deploy.clone(),
            ctx.config.poll_interval,
            ctx.config.deployment_timeout,
        );
        poller.wait_until_ready(&deployment_id, &credential).await?;

        Ok(StageResult::succeeded(StageName::CreateDeployment, started)
            .with_artifact(working)
            .with_export(DEPLOYMENT_ID_EXPORT, deployment_id))
    }
}
