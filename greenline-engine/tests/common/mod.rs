//! Shared in-memory fakes for pipeline integration tests

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use greenline_core::domain::artifact::ArtifactRef;
use greenline_core::domain::approval::ApprovalDecision;
use greenline_core::domain::credential::DelegatedCredential;
use greenline_core::domain::deployment::{DeploymentRecord, DeploymentStatus};
use greenline_core::domain::run::PipelineRun;
use greenline_core::domain::stage::StageName;
use greenline_core::dto::bundle::SourceBundle;

use greenline_engine::approval::ApprovalRegistry;
use greenline_engine::config::PipelineConfig;
use greenline_engine::error::{PipelineError, Result};
use greenline_engine::service::{
    ApprovalNotifier, ArtifactStore, CredentialBroker, DeployApi, ImageRegistry, ParameterStore,
    Services, SourceFetcher, StopOutcome, TaskRegistry,
};
use greenline_engine::store::RunStore;

pub const TASK_DEFINITION_ARN: &str = "arn:aws:ecs:ca-central-1:123123123:task-definition/myapp:7";
pub const DEPLOYMENT_ID: &str = "D-1001";

fn credential() -> DelegatedCredential {
    DelegatedCredential::new(
        "AKID".to_string(),
        "secret".to_string(),
        "token".to_string(),
        Utc::now() + chrono::Duration::hours(1),
    )
}

/// Credential broker that records every assume call
#[derive(Default)]
pub struct RecordingBroker {
    pub calls: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl CredentialBroker for RecordingBroker {
    async fn assume(&self, role_arn: &str, session_name: &str) -> Result<DelegatedCredential> {
        self.calls
            .lock()
            .unwrap()
            .push((role_arn.to_string(), session_name.to_string()));
        Ok(credential())
    }
}

impl RecordingBroker {
    pub fn roles(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(r, _)| r.clone()).collect()
    }
}

/// Source fetcher serving a fixed descriptor bundle
#[derive(Default)]
pub struct FakeSources {
    pub fetches: AtomicUsize,
}

#[async_trait]
impl SourceFetcher for FakeSources {
    async fn fetch(&self, _revision: &str) -> Result<SourceBundle> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(SourceBundle {
            task_definition: r#"{"family":"myapp","image":"<IMAGE_NAME>"}"#.to_string(),
            appspec: "version: 0.0\nResources:\n  TargetService:\n    TaskDefinition: <TASK_DEFINITION>\n".to_string(),
        })
    }
}

/// Image registry serving a configurable detail document
pub struct FakeImages {
    pub detail: Mutex<serde_json::Value>,
}

impl FakeImages {
    pub fn with_image(image_uri: &str) -> Self {
        Self {
            detail: Mutex::new(serde_json::json!({ "ImageURI": image_uri })),
        }
    }
}

#[async_trait]
impl ImageRegistry for FakeImages {
    async fn image_detail(&self, _tag: &str) -> Result<serde_json::Value> {
        Ok(self.detail.lock().unwrap().clone())
    }
}

/// Task registry issuing a fixed revision identifier
#[derive(Default)]
pub struct FakeTasks {
    pub registered: Mutex<Vec<serde_json::Value>>,
}

#[async_trait]
impl TaskRegistry for FakeTasks {
    async fn register(
        &self,
        task_definition: serde_json::Value,
        _credential: &DelegatedCredential,
    ) -> Result<String> {
        self.registered.lock().unwrap().push(task_definition);
        Ok(TASK_DEFINITION_ARN.to_string())
    }
}

/// In-memory artifact bucket
#[derive(Default)]
pub struct InMemoryArtifacts {
    pub objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryArtifacts {
    pub fn object(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }
}

#[async_trait]
impl ArtifactStore for InMemoryArtifacts {
    async fn put(
        &self,
        run_id: Uuid,
        stage: StageName,
        name: &str,
        body: Vec<u8>,
    ) -> Result<ArtifactRef> {
        let artifact = ArtifactRef::new(run_id, stage, name);
        self.objects
            .lock()
            .unwrap()
            .insert(artifact.object_key(), body);
        Ok(artifact)
    }

    async fn get(&self, artifact: &ArtifactRef) -> Result<Vec<u8>> {
        let key = artifact.object_key();
        self.objects
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or(PipelineError::ArtifactNotFound(key))
    }

    async fn publish(&self, key: &str, body: Vec<u8>) -> Result<()> {
        self.objects.lock().unwrap().insert(key.to_string(), body);
        Ok(())
    }
}

/// In-memory parameter store
#[derive(Default)]
pub struct InMemoryParameters {
    pub values: Mutex<HashMap<String, String>>,
}

impl InMemoryParameters {
    pub fn value(&self, name: &str) -> Option<String> {
        self.values.lock().unwrap().get(name).cloned()
    }

    pub fn set(&self, name: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(name.to_string(), value.to_string());
    }
}

#[async_trait]
impl ParameterStore for InMemoryParameters {
    async fn put(&self, name: &str, value: &str, _credential: &DelegatedCredential) -> Result<()> {
        self.set(name, value);
        Ok(())
    }

    async fn get(&self, name: &str, _credential: &DelegatedCredential) -> Result<Option<String>> {
        Ok(self.value(name))
    }
}

/// Deployment service fake with a scripted status sequence
pub struct FakeDeploy {
    statuses: Mutex<VecDeque<DeploymentStatus>>,
    stopped: AtomicBool,
    pub resumes: Mutex<Vec<String>>,
    pub stops: Mutex<Vec<String>>,
}

impl FakeDeploy {
    /// Statuses served in order; once exhausted the deployment reports Ready
    pub fn with_statuses(statuses: Vec<DeploymentStatus>) -> Self {
        Self {
            statuses: Mutex::new(statuses.into()),
            stopped: AtomicBool::new(false),
            resumes: Mutex::new(Vec::new()),
            stops: Mutex::new(Vec::new()),
        }
    }

    pub fn stop_count(&self) -> usize {
        self.stops.lock().unwrap().len()
    }

    pub fn resume_count(&self) -> usize {
        self.resumes.lock().unwrap().len()
    }

    /// Marks the deployment as already finished before any stop arrives
    pub fn mark_finished(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

impl Default for FakeDeploy {
    fn default() -> Self {
        Self::with_statuses(vec![DeploymentStatus::InProgress, DeploymentStatus::Ready])
    }
}

#[async_trait]
impl DeployApi for FakeDeploy {
    async fn create(
        &self,
        application: &str,
        deployment_group: &str,
        _bundle_key: &str,
        _credential: &DelegatedCredential,
    ) -> Result<DeploymentRecord> {
        Ok(DeploymentRecord {
            id: DEPLOYMENT_ID.to_string(),
            application: application.to_string(),
            deployment_group: deployment_group.to_string(),
            status: DeploymentStatus::Created,
            created_at: Utc::now(),
        })
    }

    async fn status(
        &self,
        _deployment_id: &str,
        _credential: &DelegatedCredential,
    ) -> Result<DeploymentStatus> {
        Ok(self
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(DeploymentStatus::Ready))
    }

    async fn resume(&self, deployment_id: &str, _credential: &DelegatedCredential) -> Result<()> {
        self.resumes.lock().unwrap().push(deployment_id.to_string());
        Ok(())
    }

    async fn stop(
        &self,
        deployment_id: &str,
        _auto_rollback: bool,
        _credential: &DelegatedCredential,
    ) -> Result<StopOutcome> {
        self.stops.lock().unwrap().push(deployment_id.to_string());
        if self.stopped.swap(true, Ordering::SeqCst) {
            Ok(StopOutcome::AlreadyFinished)
        } else {
            Ok(StopOutcome::Stopped)
        }
    }
}

/// Notifier that counts publishes
#[derive(Default)]
pub struct CountingNotifier {
    pub published: AtomicUsize,
}

#[async_trait]
impl ApprovalNotifier for CountingNotifier {
    async fn notify(&self, _topic: &str, _subject: &str, _message: &str) -> Result<()> {
        self.published.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Full set of fakes wired into a `Services` bundle
pub struct Harness {
    pub config: PipelineConfig,
    pub broker: Arc<RecordingBroker>,
    pub sources: Arc<FakeSources>,
    pub images: Arc<FakeImages>,
    pub tasks: Arc<FakeTasks>,
    pub artifacts: Arc<InMemoryArtifacts>,
    pub parameters: Arc<InMemoryParameters>,
    pub deploy: Arc<FakeDeploy>,
    pub notifier: Arc<CountingNotifier>,
    pub store: Arc<RunStore>,
    pub approvals: Arc<ApprovalRegistry>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_deploy(FakeDeploy::default())
    }

    pub fn with_deploy(deploy: FakeDeploy) -> Self {
        let mut config = PipelineConfig::default();
        // Tight intervals keep the tests fast without a paused clock.
        config.poll_interval = Duration::from_millis(10);
        config.deployment_timeout = Duration::from_secs(2);
        config.approval_timeout = Duration::from_secs(5);

        Self {
            config,
            broker: Arc::new(RecordingBroker::default()),
            sources: Arc::new(FakeSources::default()),
            images: Arc::new(FakeImages::with_image("registry/app:rc-42")),
            tasks: Arc::new(FakeTasks::default()),
            artifacts: Arc::new(InMemoryArtifacts::default()),
            parameters: Arc::new(InMemoryParameters::default()),
            deploy: Arc::new(deploy),
            notifier: Arc::new(CountingNotifier::default()),
            store: Arc::new(RunStore::new()),
            approvals: Arc::new(ApprovalRegistry::new()),
        }
    }

    pub fn services(&self) -> Services {
        Services {
            credentials: self.broker.clone(),
            sources: self.sources.clone(),
            images: self.images.clone(),
            tasks: self.tasks.clone(),
            artifacts: self.artifacts.clone(),
            parameters: self.parameters.clone(),
            deploy: self.deploy.clone(),
            notifier: self.notifier.clone(),
        }
    }
}

/// Polls the store until the run reaches a terminal status
pub async fn wait_for_terminal(store: &RunStore, run_id: Uuid) -> PipelineRun {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(run) = store.get(run_id).await {
            if run.status.is_terminal() {
                return run;
            }
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "run {} never reached a terminal status",
            run_id
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// Resolves the approval gate as soon as it opens
pub async fn resolve_approval(
    approvals: &ApprovalRegistry,
    run_id: Uuid,
    decision: ApprovalDecision,
) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while !approvals.resolve(run_id, decision) {
        assert!(
            tokio::time::Instant::now() < deadline,
            "approval gate for run {} never opened",
            run_id
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

/// Waits until the deployment fake has seen the expected number of stops
pub async fn wait_for_stops(deploy: &FakeDeploy, expected: usize) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while deploy.stop_count() < expected {
        assert!(
            tokio::time::Instant::now() < deadline,
            "expected {} stop request(s), saw {}",
            expected,
            deploy.stop_count()
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
