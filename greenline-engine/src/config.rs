//! Pipeline configuration
//!
//! Defines all configurable parameters for the deployment pipeline:
//! the target application identifiers, the two delegated roles, and the
//! polling/approval bounds.

use std::time::Duration;

/// Pipeline configuration
///
/// The identifiers here are configuration inputs, never computed by the
/// engine: role ARNs come from the account topology, application and group
/// names from the deployment system.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Application name; also namespaces the deployment-id parameter
    pub app_name: String,

    /// Environment name (e.g. "sbx", "prod"), used in operator-facing text
    pub stage_name: String,

    /// Container name recorded in the build output contract
    pub container_name: String,

    /// Deployment system application name in the target account
    pub deploy_application: String,

    /// Blue/green deployment group name in the target account
    pub deploy_group: String,

    /// Role assumed by Build, CreateDeployment, and RerouteTraffic
    pub deployer_role_arn: String,

    /// Narrower role assumed only by the rollback path
    pub rollback_role_arn: String,

    /// Optional topic notified when a run reaches the approval gate
    pub notification_topic: Option<String>,

    /// Fixed interval between deployment status queries
    pub poll_interval: Duration,

    /// Upper bound on the total wait for a deployment to become Ready
    pub deployment_timeout: Duration,

    /// Upper bound on the wait for an operator decision
    pub approval_timeout: Duration,
}

impl PipelineConfig {
    /// Creates a configuration with default intervals
    pub fn new(
        app_name: String,
        deploy_application: String,
        deploy_group: String,
        deployer_role_arn: String,
        rollback_role_arn: String,
    ) -> Self {
        Self {
            app_name,
            stage_name: "sbx".to_string(),
            container_name: "containerRepo".to_string(),
            deploy_application,
            deploy_group,
            deployer_role_arn,
            rollback_role_arn,
            notification_topic: None,
            poll_interval: Duration::from_secs(10),
            deployment_timeout: Duration::from_secs(30 * 60),
            approval_timeout: Duration::from_secs(24 * 60 * 60),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - APP_NAME (required)
    /// - DEPLOY_APPLICATION (required)
    /// - DEPLOY_GROUP (required)
    /// - DEPLOYER_ROLE_ARN (required)
    /// - ROLLBACK_ROLE_ARN (required)
    /// - STAGE_NAME (optional, default: "sbx")
    /// - CONTAINER_NAME (optional, default: "containerRepo")
    /// - NOTIFICATION_TOPIC (optional; unset means no approval notification)
    /// - POLL_INTERVAL (optional, seconds, default: 10)
    /// - DEPLOYMENT_TIMEOUT (optional, seconds, default: 1800)
    /// - APPROVAL_TIMEOUT (optional, seconds, default: 86400)
    pub fn from_env() -> anyhow::Result<Self> {
        let required = |name: &str| {
            std::env::var(name)
                .map_err(|_| anyhow::anyhow!("{} environment variable not set", name))
        };

        let mut config = Self::new(
            required("APP_NAME")?,
            required("DEPLOY_APPLICATION")?,
            required("DEPLOY_GROUP")?,
            required("DEPLOYER_ROLE_ARN")?,
            required("ROLLBACK_ROLE_ARN")?,
        );

        if let Ok(stage_name) = std::env::var("STAGE_NAME") {
            config.stage_name = stage_name;
        }
        if let Ok(container_name) = std::env::var("CONTAINER_NAME") {
            config.container_name = container_name;
        }
        config.notification_topic = std::env::var("NOTIFICATION_TOPIC").ok();

        if let Some(secs) = std::env::var("POLL_INTERVAL")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.poll_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = std::env::var("DEPLOYMENT_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.deployment_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = std::env::var("APPROVAL_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.approval_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Namespaced parameter under which the active deployment id is persisted
    ///
    /// Written by CreateDeployment, read by rollback. This channel survives
    /// controller restarts; the in-memory run registry does not.
    pub fn deployment_id_parameter(&self) -> String {
        format!("/{}/DeploymentId", self.app_name)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.app_name.is_empty() {
            anyhow::bail!("app_name cannot be empty");
        }

        if self.deploy_application.is_empty() || self.deploy_group.is_empty() {
            anyhow::bail!("deploy_application and deploy_group cannot be empty");
        }

        if self.deployer_role_arn.is_empty() || self.rollback_role_arn.is_empty() {
            anyhow::bail!("both role ARNs must be set");
        }

        if self.deployer_role_arn == self.rollback_role_arn {
            anyhow::bail!("rollback_role_arn must be a distinct, narrower role");
        }

        if self.poll_interval.as_secs() == 0 {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.deployment_timeout <= self.poll_interval {
            anyhow::bail!("deployment_timeout must exceed poll_interval");
        }

        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(
            "myapp".to_string(),
            "myapp-deploy".to_string(),
            "myapp-deploy-group".to_string(),
            "arn:aws:iam::123123123:role/myapp-deployer".to_string(),
            "arn:aws:iam::123123123:role/myapp-rollback".to_string(),
        )
    }
}
