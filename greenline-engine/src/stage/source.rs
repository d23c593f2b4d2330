//! Source stage
//!
//! Fetches the revision that triggered the run and stores its bundle as the
//! source artifact. The triggering revision is immutable, so a failure here
//! is fatal and re-running requires a new trigger.

use async_trait::async_trait;
use chrono::Utc;
use greenline_core::domain::stage::{StageName, StageResult};
use tracing::info;

use crate::error::Result;
use crate::stage::{Stage, StageContext};

pub struct SourceStage;

/// Artifact name of the stored source bundle
pub const BUNDLE_ARTIFACT: &str = "bundle.json";

#[async_trait]
impl Stage for SourceStage {
    fn name(&self) -> StageName {
        StageName::Source
    }

    async fn run(&self, ctx: &StageContext<'_>) -> Result<StageResult> {
        let started = Utc::now();

        info!(
            "Fetching source bundle for revision {}",
            ctx.run.source_revision
        );
        let bundle = ctx.services.sources.fetch(&ctx.run.source_revision).await?;

        let body = serde_json::to_vec(&bundle)?;
        let artifact = ctx
            .services
            .artifacts
            .put(ctx.run.id, StageName::Source, BUNDLE_ARTIFACT, body)
            .await?;

        Ok(StageResult::succeeded(StageName::Source, started).with_artifact(artifact))
    }
}
