//! Rollback controller
//!
//! Reacts to failed stage exits, rejected approvals, and external alarm
//! breaches by stopping the active deployment with automatic rollback. The
//! deployment id is read from the shared parameter store, never from the
//! in-memory run registry, so rollback works even after a controller
//! restart.

use std::sync::Arc;

use greenline_core::domain::run::RunStatus;
use greenline_core::dto::alarm::{AlarmNotification, AlarmState};
use greenline_core::dto::event::RunEvent;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::service::{CredentialBroker, DeployApi, ParameterStore, Services, StopOutcome};
use crate::store::RunStore;

/// Stops the active deployment on failure, rejection, or alarm
pub struct RollbackController {
    config: PipelineConfig,
    credentials: Arc<dyn CredentialBroker>,
    deploy: Arc<dyn DeployApi>,
    parameters: Arc<dyn ParameterStore>,
    store: Arc<RunStore>,
}

impl RollbackController {
    pub fn new(config: PipelineConfig, services: &Services, store: Arc<RunStore>) -> Self {
        Self {
            config,
            credentials: services.credentials.clone(),
            deploy: services.deploy.clone(),
            parameters: services.parameters.clone(),
            store,
        }
    }

    /// Subscribes to run events and rolls back on every qualifying failure
    pub fn spawn(self: Arc<Self>, mut events: broadcast::Receiver<RunEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => {
                        if !event.requires_rollback() {
                            continue;
                        }
                        info!(
                            "Run {}: stage {} failed, initiating rollback",
                            event.run_id, event.stage
                        );
                        if let Err(e) = self.roll_back().await {
                            error!("Rollback for run {} failed: {}", event.run_id, e);
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        warn!("Rollback listener lagged; {} events dropped", missed);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    /// Handles an external alarm breach
    ///
    /// Alarms are correlated by application name; anything else is ignored.
    /// A run that had already succeeded when its alarm fired is marked
    /// RolledBack.
    pub async fn handle_alarm(&self, alarm: &AlarmNotification) -> Result<Option<String>> {
        if alarm.state != AlarmState::Alarm {
            debug!("Ignoring alarm {} in state {:?}", alarm.alarm_name, alarm.state);
            return Ok(None);
        }
        if alarm.application != self.config.deploy_application {
            warn!(
                "Alarm {} names unknown application {}; ignoring",
                alarm.alarm_name, alarm.application
            );
            return Ok(None);
        }

        info!(
            "Alarm {} breached for {}, initiating rollback",
            alarm.alarm_name, alarm.application
        );
        let deployment_id = self.roll_back().await?;

        if let Some(run) = self.store.find_by_deployment(&deployment_id).await {
            if run.status == RunStatus::Succeeded {
                self.store
                    .update(run.id, |r| r.status = RunStatus::RolledBack)
                    .await;
            }
        }

        Ok(Some(deployment_id))
    }

    /// Stops the active deployment with automatic rollback enabled
    ///
    /// Idempotent: a deployment already in a terminal state is success, not
    /// an error. A missing deployment id cannot self-heal and is surfaced to
    /// the operator as `RollbackTargetMissing`.
    pub async fn roll_back(&self) -> Result<String> {
        let credential = self
            .credentials
            .assume(&self.config.rollback_role_arn, "rollback")
            .await?;

        let parameter = self.config.deployment_id_parameter();
        let deployment_id = self
            .parameters
            .get(&parameter, &credential)
            .await?
            .ok_or_else(|| {
                error!("No deployment id under {}; rollback has no target", parameter);
                PipelineError::RollbackTargetMissing { parameter }
            })?;

        match self.deploy.stop(&deployment_id, true, &credential).await? {
            StopOutcome::Stopped => {
                info!(
                    "Deployment {} stopped with automatic rollback",
                    deployment_id
                );
            }
            StopOutcome::AlreadyFinished => {
                info!(
                    "Deployment {} already finished; nothing to stop",
                    deployment_id
                );
            }
        }

        Ok(deployment_id)
    }
}
