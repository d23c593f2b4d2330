//! Run API Handlers
//!
//! HTTP endpoints for run inspection and the approval gate.

use axum::{
    Json,
    extract::{Path, State},
};
use greenline_core::domain::run::PipelineRun;
use greenline_core::dto::approval::ApprovalRequest;
use greenline_core::dto::run::RunSummary;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /run/list
/// List all runs, most recent first
pub async fn list_runs(State(state): State<AppState>) -> ApiResult<Json<Vec<RunSummary>>> {
    tracing::debug!("Listing runs");

    Ok(Json(state.store.list().await))
}

/// GET /run/{id}
/// Get a run by ID
pub async fn get_run(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<PipelineRun>> {
    tracing::debug!("Getting run: {}", id);

    let run = state
        .store
        .get(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Run {} not found", id)))?;

    Ok(Json(run))
}

/// POST /run/{id}/approval
/// Decide a run's pending approval gate
pub async fn decide_approval(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ApprovalRequest>,
) -> ApiResult<Json<RunSummary>> {
    tracing::info!(
        "Approval decision for run {}: {:?} ({})",
        id,
        req.decision,
        req.comment.as_deref().unwrap_or("no comment")
    );

    if !state.approvals.resolve(id, req.decision) {
        return Err(ApiError::NotFound(format!(
            "Run {} has no pending approval",
            id
        )));
    }

    let run = state
        .store
        .get(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Run {} not found", id)))?;

    Ok(Json(RunSummary::from(&run)))
}
