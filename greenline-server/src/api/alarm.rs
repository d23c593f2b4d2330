//! Alarm API Handler
//!
//! Entry point for breach notifications from the external alarm watcher.

use axum::{Json, extract::State};
use greenline_core::dto::alarm::{AlarmNotification, AlarmResponse};

use crate::api::error::{ApiError, ApiResult};
use crate::state::AppState;

/// POST /alarm
/// Process an alarm notification, rolling back the active deployment on a
/// breach
pub async fn alarm_breach(
    State(state): State<AppState>,
    Json(alarm): Json<AlarmNotification>,
) -> ApiResult<Json<AlarmResponse>> {
    tracing::info!(
        "Alarm notification: {} ({:?})",
        alarm.alarm_name,
        alarm.state
    );

    let deployment_id = state.rollback.handle_alarm(&alarm).await.map_err(|e| {
        // Includes the missing-target case, which cannot self-heal and must
        // reach the operator.
        ApiError::InternalError(e.to_string())
    })?;

    Ok(Json(AlarmResponse { deployment_id }))
}
