//! Shared application state

use std::sync::Arc;

use greenline_engine::approval::ApprovalRegistry;
use greenline_engine::controller::PipelineController;
use greenline_engine::rollback::RollbackController;
use greenline_engine::store::RunStore;

/// State shared by all API handlers
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<PipelineController>,
    pub rollback: Arc<RollbackController>,
    pub store: Arc<RunStore>,
    pub approvals: Arc<ApprovalRegistry>,
}
