//! Build stage
//!
//! Renders the deployment descriptors: substitutes the image reference into
//! the task definition, registers the new task revision in the target
//! account, and substitutes the returned identifier into the appspec. Also
//! writes the single-file image definition artifact consumed downstream.

use async_trait::async_trait;
use chrono::Utc;
use greenline_core::domain::stage::{StageName, StageResult};
use greenline_core::dto::bundle::{
    IMAGE_PLACEHOLDER, ImageDefinition, SourceBundle, TASK_DEFINITION_PLACEHOLDER,
};
use tracing::info;

use crate::error::{PipelineError, Result};
use crate::stage::source::BUNDLE_ARTIFACT;
use crate::stage::{Stage, StageContext};

pub struct BuildStage;

/// Artifact name of the rendered appspec manifest
pub const APPSPEC_ARTIFACT: &str = "appspec.yml";
/// Artifact name of the build output contract
pub const IMAGE_DEFINITIONS_ARTIFACT: &str = "imagedefinitions.json";

/// Exported variable: the image reference resolved from the registry
pub const IMAGE_URI_EXPORT: &str = "IMAGE_URI";
/// Exported variable: the registered task definition identifier
pub const TASK_DEFINITION_EXPORT: &str = "TASK_DEFINITION_ARN";

/// Field of the image detail document carrying the image reference
const IMAGE_URI_FIELD: &str = "ImageURI";

#[async_trait]
impl Stage for BuildStage {
    fn name(&self) -> StageName {
        StageName::Build
    }

    async fn run(&self, ctx: &StageContext<'_>) -> Result<StageResult> {
        let started = Utc::now();

        let source = ctx.run.stage_result(StageName::Source).ok_or_else(|| {
            PipelineError::MissingExport {
                stage: StageName::Source,
                name: BUNDLE_ARTIFACT.to_string(),
            }
        })?;
        let bundle_ref = source.artifact(BUNDLE_ARTIFACT).ok_or_else(|| {
            PipelineError::ArtifactNotFound(format!("Source produced no {}", BUNDLE_ARTIFACT))
        })?;

        let body = ctx.services.artifacts.get(bundle_ref).await?;
        let bundle: SourceBundle = serde_json::from_slice(&body)?;

        // Second upstream input: the registry's image detail document.
        let detail = ctx.services.images.image_detail(&ctx.run.image_tag).await?;
        let image_uri = detail
            .get(IMAGE_URI_FIELD)
            .and_then(serde_json::Value::as_str)
            .ok_or(PipelineError::MissingImageDetail {
                field: IMAGE_URI_FIELD,
            })?
            .to_string();

        info!("Rendering task definition with image {}", image_uri);
        let rendered = bundle.task_definition.replace(IMAGE_PLACEHOLDER, &image_uri);
        let task_definition: serde_json::Value = serde_json::from_str(&rendered)?;

        let credential = ctx
            .services
            .credentials
            .assume(&ctx.config.deployer_role_arn, "build-task-registration")
            .await?;
        let task_definition_arn = ctx
            .services
            .tasks
            .register(task_definition, &credential)
            .await?;
        drop(credential);

        info!("Registered task definition {}", task_definition_arn);

        // The identifier is substituted verbatim, as the appspec template
        // expects it.
        let appspec = bundle
            .appspec
            .replace(TASK_DEFINITION_PLACEHOLDER, &task_definition_arn);
        let appspec_ref = ctx
            .services
            .artifacts
            .put(
                ctx.run.id,
                StageName::Build,
                APPSPEC_ARTIFACT,
                appspec.into_bytes(),
            )
            .await?;

        let image_definitions = serde_json::to_vec(&vec![ImageDefinition {
            name: ctx.config.container_name.clone(),
            image_uri: image_uri.clone(),
        }])?;
        let definitions_ref = ctx
            .services
            .artifacts
            .put(
                ctx.run.id,
                StageName::Build,
                IMAGE_DEFINITIONS_ARTIFACT,
                image_definitions,
            )
            .await?;

        Ok(StageResult::succeeded(StageName::Build, started)
            .with_artifact(appspec_ref)
            .with_artifact(definitions_ref)
            .with_export(IMAGE_URI_EXPORT, image_uri)
            .with_export(TASK_DEFINITION_EXPORT, task_definition_arn))
    }
}
