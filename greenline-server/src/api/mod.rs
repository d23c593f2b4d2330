//! API Module
//!
//! HTTP API layer for the pipeline server.
//! Each submodule handles endpoints for a specific concern.

pub mod alarm;
pub mod error;
pub mod health;
pub mod run;
pub mod trigger;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Trigger endpoint
        .route("/trigger/image-push", post(trigger::image_push))
        // Run endpoints
        .route("/run/list", get(run::list_runs))
        .route("/run/{id}", get(run::get_run))
        .route("/run/{id}/approval", post(run::decide_approval))
        // Alarm endpoint
        .route("/alarm", post(alarm::alarm_breach))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
