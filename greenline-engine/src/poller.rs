//! Deployment status poller
//!
//! Polls the deployment system at a fixed interval until the deployment is
//! ready to shift traffic, it fails, or the configured bound elapses.

use std::sync::Arc;
use std::time::Duration;

use greenline_core::domain::credential::DelegatedCredential;
use greenline_core::domain::deployment::DeploymentStatus;
use tokio::time::{self, Instant};
use tracing::{debug, info};

use crate::error::{PipelineError, Result};
use crate::service::DeployApi;

/// Waits for a deployment to reach the Ready state
pub struct DeploymentStatusPoller {
    deploy: Arc<dyn DeployApi>,
    poll_interval: Duration,
    timeout: Duration,
}

impl DeploymentStatusPoller {
    /// Creates a poller with a fixed interval and a total-wait bound
    pub fn new(deploy: Arc<dyn DeployApi>, poll_interval: Duration, timeout: Duration) -> Self {
        Self {
            deploy,
            poll_interval,
            timeout,
        }
    }

    /// Polls until the deployment reports Ready
    ///
    /// Returns immediately on a terminal state: Ok on Ready,
    /// `DeploymentFailed` on a failure status. The total wait never exceeds
    /// the configured timeout; on expiry this returns `Timeout` instead of
    /// looping forever.
    pub async fn wait_until_ready(
        &self,
        deployment_id: &str,
        credential: &DelegatedCredential,
    ) -> Result<()> {
        let started = Instant::now();

        loop {
            let status = self.deploy.status(deployment_id, credential).await?;

            match status {
                DeploymentStatus::Ready => {
                    info!(
                        "Deployment {} ready after {:?}",
                        deployment_id,
                        started.elapsed()
                    );
                    return Ok(());
                }
                status if status.is_failed() => {
                    return Err(PipelineError::DeploymentFailed {
                        deployment_id: deployment_id.to_string(),
                        status,
                    });
                }
                status => {
                    debug!("Deployment {} in progress ({})", deployment_id, status);
                }
            }

            if started.elapsed() + self.poll_interval > self.timeout {
                return Err(PipelineError::Timeout {
                    operation: format!("deployment {}", deployment_id),
                    waited_secs: started.elapsed().as_secs(),
                });
            }

            time::sleep(self.poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::service::StopOutcome;

    /// Deploy API fake that serves a scripted status sequence
    struct ScriptedDeploy {
        statuses: Mutex<VecDeque<DeploymentStatus>>,
        queries: AtomicUsize,
    }

    impl ScriptedDeploy {
        fn new(statuses: Vec<DeploymentStatus>) -> Arc<Self> {
            Arc::new(Self {
                statuses: Mutex::new(statuses.into()),
                queries: AtomicUsize::new(0),
            })
        }

        fn queries(&self) -> usize {
            self.queries.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DeployApi for ScriptedDeploy {
        async fn create(
            &self,
            _application: &str,
            _deployment_group: &str,
            _bundle_key: &str,
            _credential: &DelegatedCredential,
        ) -> Result<greenline_core::domain::deployment::DeploymentRecord> {
            unimplemented!("not used by poller tests")
        }

        async fn status(
            &self,
            _deployment_id: &str,
            _credential: &DelegatedCredential,
        ) -> Result<DeploymentStatus> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            // Once the script runs out, the deployment stays in progress.
            let status = self
                .statuses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(DeploymentStatus::InProgress);
            Ok(status)
        }

        async fn resume(&self, _deployment_id: &str, _credential: &DelegatedCredential) -> Result<()> {
            unimplemented!("not used by poller tests")
        }

        async fn stop(
            &self,
            _deployment_id: &str,
            _auto_rollback: bool,
            _credential: &DelegatedCredential,
        ) -> Result<StopOutcome> {
            unimplemented!("not used by poller tests")
        }
    }

    fn credential() -> DelegatedCredential {
        DelegatedCredential::new(
            "AKID".to_string(),
            "secret".to_string(),
            "token".to_string(),
            Utc::now() + chrono::Duration::hours(1),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_after_two_sleep_cycles() {
        let deploy = ScriptedDeploy::new(vec![
            DeploymentStatus::InProgress,
            DeploymentStatus::InProgress,
            DeploymentStatus::Ready,
        ]);
        let poller = DeploymentStatusPoller::new(
            deploy.clone(),
            Duration::from_secs(10),
            Duration::from_secs(300),
        );

        let started = Instant::now();
        poller.wait_until_ready("d-1001", &credential()).await.unwrap();

        assert_eq!(deploy.queries(), 3);
        // Two sleep cycles of the fixed 10s interval.
        assert_eq!(started.elapsed(), Duration::from_secs(20));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_immediately_skips_sleeping() {
        let deploy = ScriptedDeploy::new(vec![DeploymentStatus::Ready]);
        let poller = DeploymentStatusPoller::new(
            deploy.clone(),
            Duration::from_secs(10),
            Duration::from_secs(300),
        );

        let started = Instant::now();
        poller.wait_until_ready("d-1001", &credential()).await.unwrap();

        assert_eq!(deploy.queries(), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_deployment_returns_without_further_polling() {
        let deploy = ScriptedDeploy::new(vec![
            DeploymentStatus::InProgress,
            DeploymentStatus::Failed,
        ]);
        let poller = DeploymentStatusPoller::new(
            deploy.clone(),
            Duration::from_secs(10),
            Duration::from_secs(300),
        );

        let err = poller
            .wait_until_ready("d-1001", &credential())
            .await
            .unwrap_err();

        match err {
            PipelineError::DeploymentFailed {
                deployment_id,
                status,
            } => {
                assert_eq!(deployment_id, "d-1001");
                assert_eq!(status, DeploymentStatus::Failed);
            }
            other => panic!("expected DeploymentFailed, got {:?}", other),
        }
        assert_eq!(deploy.queries(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_bounds_total_wait() {
        // The script never reaches Ready; interval 10s and timeout 25s allow
        // queries at t=0, t=10, and t=20 before the bound trips.
        let deploy = ScriptedDeploy::new(vec![]);
        let poller = DeploymentStatusPoller::new(
            deploy.clone(),
            Duration::from_secs(10),
            Duration::from_secs(25),
        );

        let started = Instant::now();
        let err = poller
            .wait_until_ready("d-1001", &credential())
            .await
            .unwrap_err();

        match err {
            PipelineError::Timeout { waited_secs, .. } => assert_eq!(waited_secs, 20),
            other => panic!("expected Timeout, got {:?}", other),
        }
        assert_eq!(deploy.queries(), 3);
        assert!(started.elapsed() <= Duration::from_secs(25));
    }
}
