//! Trigger API Handler
//!
//! Receives image push events from the registry. Only release-candidate tags
//! start a pipeline run; anything else is acknowledged and ignored.

use axum::{Json, extract::State};
use greenline_core::dto::trigger::{ImagePushEvent, TriggerResponse};

use crate::api::error::ApiResult;
use crate::state::AppState;

/// POST /trigger/image-push
/// Submit an image push event
pub async fn image_push(
    State(state): State<AppState>,
    Json(event): Json<ImagePushEvent>,
) -> ApiResult<Json<TriggerResponse>> {
    tracing::info!("Image push event for tag {}", event.image_tag);

    let run_id = state.controller.clone().handle_trigger(event).await;

    Ok(Json(TriggerResponse {
        accepted: run_id.is_some(),
        run_id,
    }))
}
