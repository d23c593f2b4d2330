//! In-memory run registry
//!
//! Holds the live state of pipeline runs for inspection and mutation by the
//! controller. This registry is deliberately not durable: the parameter
//! store carries the deployment id across restarts, and operators re-trigger
//! from Source after remediation rather than resuming mid-pipeline.

use std::collections::HashMap;

use greenline_core::domain::run::PipelineRun;
use greenline_core::dto::run::RunSummary;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Registry of pipeline runs, keyed by run id
#[derive(Default)]
pub struct RunStore {
    runs: RwLock<HashMap<Uuid, PipelineRun>>,
}

impl RunStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a freshly created run
    pub async fn insert(&self, run: PipelineRun) {
        self.runs.write().await.insert(run.id, run);
    }

    /// Snapshot of a run by id
    pub async fn get(&self, run_id: Uuid) -> Option<PipelineRun> {
        self.runs.read().await.get(&run_id).cloned()
    }

    /// Summaries of all runs, most recent first
    pub async fn list(&self) -> Vec<RunSummary> {
        let runs = self.runs.read().await;
        let mut summaries: Vec<RunSummary> = runs.values().map(RunSummary::from).collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        summaries
    }

    /// Applies a mutation to a run; returns false when the run is unknown
    pub async fn update<F>(&self, run_id: Uuid, mutate: F) -> bool
    where
        F: FnOnce(&mut PipelineRun),
    {
        let mut runs = self.runs.write().await;
        match runs.get_mut(&run_id) {
            Some(run) => {
                mutate(run);
                true
            }
            None => false,
        }
    }

    /// Finds the run that published a given deployment id
    pub async fn find_by_deployment(&self, deployment_id: &str) -> Option<PipelineRun> {
        self.runs
            .read()
            .await
            .values()
            .find(|run| run.deployment_id.as_deref() == Some(deployment_id))
            .cloned()
    }
}
