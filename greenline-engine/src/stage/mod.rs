//! Pipeline stages
//!
//! One executor per stage, composed in fixed order by the controller. Each
//! stage receives a read-only context (the run snapshot, configuration, and
//! the service seams) and returns its result or the error that halts the
//! run.

pub mod approval;
pub mod build;
pub mod create_deployment;
pub mod reroute;
pub mod source;

pub use approval::ApprovalStage;
pub use build::BuildStage;
pub use create_deployment::CreateDeploymentStage;
pub use reroute::RerouteTrafficStage;
pub use source::SourceStage;

use async_trait::async_trait;
use greenline_core::domain::run::PipelineRun;
use greenline_core::domain::stage::{StageName, StageResult};
use std::sync::Arc;

use crate::approval::ApprovalRegistry;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::service::Services;

/// Read-only view a stage executes against
///
/// The run snapshot carries every predecessor's result; exported variables
/// travel only through those results, never through ambient state.
pub struct StageContext<'a> {
    pub run: &'a PipelineRun,
    pub config: &'a PipelineConfig,
    pub services: &'a Services,
}

/// One unit of pipeline work
#[async_trait]
pub trait Stage: Send + Sync {
    fn name(&self) -> StageName;

    /// Executes the stage to completion
    ///
    /// Any error halts the run; stages never retry internally.
    async fn run(&self, ctx: &StageContext<'_>) -> Result<StageResult>;
}

/// The five stages in execution order
pub fn default_stages(approvals: Arc<ApprovalRegistry>) -> Vec<Box<dyn Stage>> {
    vec![
        Box::new(SourceStage),
        Box::new(BuildStage),
        Box::new(CreateDeploymentStage),
        Box::new(ApprovalStage::new(approvals)),
        Box::new(RerouteTrafficStage),
    ]
}
