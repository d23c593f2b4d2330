//! Pipeline controller
//!
//! Accepts validated trigger events, advances each run through the five
//! stages strictly sequentially, and emits an observable event per stage
//! entry and exit. Independent runs execute concurrently; the deployment
//! system is relied upon to reject overlapping deployments, and such a
//! rejection is a normal stage failure here.

use std::sync::Arc;

use chrono::Utc;
use greenline_core::domain::run::{PipelineRun, RunStatus};
use greenline_core::domain::stage::{StageName, StageResult, StageStatus};
use greenline_core::dto::event::RunEvent;
use greenline_core::dto::trigger::ImagePushEvent;
use tokio::sync::broadcast;
use tracing::{error, info};
use uuid::Uuid;

use crate::approval::ApprovalRegistry;
use crate::config::PipelineConfig;
use crate::service::Services;
use crate::stage::{Stage, StageContext, default_stages};
use crate::store::RunStore;

/// Capacity of the run event channel
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Advances pipeline runs stage by stage
pub struct PipelineController {
    config: PipelineConfig,
    services: Services,
    store: Arc<RunStore>,
    stages: Vec<Box<dyn Stage>>,
    events: broadcast::Sender<RunEvent>,
}

impl PipelineController {
    pub fn new(
        config: PipelineConfig,
        services: Services,
        store: Arc<RunStore>,
        approvals: Arc<ApprovalRegistry>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            config,
            services,
            store,
            stages: default_stages(approvals),
            events,
        }
    }

    /// Subscribe to stage entry/exit events
    pub fn subscribe(&self) -> broadcast::Receiver<RunEvent> {
        self.events.subscribe()
    }

    /// Handles an image push event
    ///
    /// Only release-candidate tags start a run; anything else is logged and
    /// ignored with zero stage executions. Returns the run id when a run was
    /// started.
    pub async fn handle_trigger(self: Arc<Self>, event: ImagePushEvent) -> Option<Uuid> {
        if !event.is_release_candidate() {
            info!(
                "Ignoring image push {}: not a release candidate",
                event.image_tag
            );
            return None;
        }

        let run = PipelineRun::new(&event.image_tag, &event.source_revision, &event.image_uri);
        let run_id = run.id;
        self.store.insert(run).await;

        info!("Starting run {} for image {}", run_id, event.image_uri);

        let controller = Arc::clone(&self);
        tokio::spawn(async move {
            controller.execute_run(run_id).await;
        });

        Some(run_id)
    }

    /// Runs every stage in order, halting on the first failure
    async fn execute_run(&self, run_id: Uuid) {
        for stage in &self.stages {
            let name = stage.name();
            let status = if name == StageName::Approval {
                RunStatus::WaitingApproval
            } else {
                RunStatus::Running
            };

            let known = self
                .store
                .update(run_id, |run| {
                    run.current_stage = Some(name);
                    run.status = status;
                })
                .await;
            if !known {
                error!("Run {} vanished from the registry", run_id);
                return;
            }

            let _ = self.events.send(RunEvent::entered(run_id, name));
            info!("Run {}: entering stage {}", run_id, name);

            let started = Utc::now();
            let Some(snapshot) = self.store.get(run_id).await else {
                return;
            };
            let ctx = StageContext {
                run: &snapshot,
                config: &self.config,
                services: &self.services,
            };

            match stage.run(&ctx).await {
                Ok(result) => {
                    self.store
                        .update(run_id, |run| run.record_stage(result.clone()))
                        .await;
                    let _ = self
                        .events
                        .send(RunEvent::exited(run_id, name, StageStatus::Succeeded));
                    info!("Run {}: stage {} succeeded", run_id, name);
                }
                Err(err) => {
                    error!(
                        "Run {}: stage {} failed ({}): {}",
                        run_id,
                        name,
                        err.kind(),
                        err
                    );
                    self.store
                        .update(run_id, |run| {
                            run.record_stage(StageResult::failed(name, started, err.to_string()));
                            run.status = RunStatus::Failed;
                            run.current_stage = None;
                        })
                        .await;
                    let _ = self.events.send(
                        RunEvent::exited(run_id, name, StageStatus::Failed)
                            .with_error(err.to_string()),
                    );
                    return;
                }
            }
        }

        self.store
            .update(run_id, |run| {
                run.status = RunStatus::Succeeded;
                run.current_stage = None;
            })
            .await;
        info!("Run {}: traffic shifted, run complete", run_id);
    }
}
