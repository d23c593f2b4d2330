//! Pipeline stage domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::domain::artifact::ArtifactRef;

/// Name of the exported variable carrying the deployment id.
///
/// Written once by the CreateDeployment stage, read by RerouteTraffic.
pub const DEPLOYMENT_ID_EXPORT: &str = "DEPLOYMENT_ID";

/// The five pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageName {
    Source,
    Build,
    CreateDeployment,
    Approval,
    RerouteTraffic,
}

impl StageName {
    /// Strict total order over the stages of one run
    pub const ORDER: [StageName; 5] = [
        StageName::Source,
        StageName::Build,
        StageName::CreateDeployment,
        StageName::Approval,
        StageName::RerouteTraffic,
    ];

    /// The stage that follows this one, if any
    pub fn next(self) -> Option<StageName> {
        match self {
            StageName::Source => Some(StageName::Build),
            StageName::Build => Some(StageName::CreateDeployment),
            StageName::CreateDeployment => Some(StageName::Approval),
            StageName::Approval => Some(StageName::RerouteTraffic),
            StageName::RerouteTraffic => None,
        }
    }

    /// Whether a failure in this stage must initiate a rollback
    ///
    /// Before CreateDeployment there is nothing to roll back; from it onward a
    /// deployment may exist in the target account.
    pub fn triggers_rollback(self) -> bool {
        matches!(
            self,
            StageName::CreateDeployment | StageName::Approval | StageName::RerouteTraffic
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StageName::Source => "Source",
            StageName::Build => "Build",
            StageName::CreateDeployment => "CreateDeployment",
            StageName::Approval => "Approval",
            StageName::RerouteTraffic => "RerouteTraffic",
        }
    }
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stage execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
}

/// Per-stage outcome
///
/// Written once by its stage when it finishes, read-only afterward.
/// Exported variables are the only channel between stages; there is no
/// ambient variables namespace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageResult {
    pub stage: StageName,
    pub status: StageStatus,
    pub artifacts: Vec<ArtifactRef>,
    pub exports: HashMap<String, String>,
    pub error: Option<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl StageResult {
    /// Creates a successful result with no artifacts or exports
    pub fn succeeded(stage: StageName, started_at: DateTime<Utc>) -> Self {
        Self {
            stage,
            status: StageStatus::Succeeded,
            artifacts: Vec::new(),
            exports: HashMap::new(),
            error: None,
            started_at,
            finished_at: Utc::now(),
        }
    }

    /// Creates a failed result carrying the originating error description
    pub fn failed(stage: StageName, started_at: DateTime<Utc>, error: impl Into<String>) -> Self {
        Self {
            stage,
            status: StageStatus::Failed,
            artifacts: Vec::new(),
            exports: HashMap::new(),
            error: Some(error.into()),
            started_at,
            finished_at: Utc::now(),
        }
    }

    /// Attaches an artifact reference
    pub fn with_artifact(mut self, artifact: ArtifactRef) -> Self {
        self.artifacts.push(artifact);
        self
    }

    /// Attaches an exported variable
    pub fn with_export(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.exports.insert(name.into(), value.into());
        self
    }

    /// Looks up a produced artifact by name
    pub fn artifact(&self, name: &str) -> Option<&ArtifactRef> {
        self.artifacts.iter().find(|a| a.name == name)
    }

    /// Looks up an exported variable by name
    pub fn export(&self, name: &str) -> Option<&str> {
        self.exports.get(name).map(String::as_str)
    }

    /// The deployment id exported by the CreateDeployment stage, if present
    pub fn deployment_id(&self) -> Option<&str> {
        self.export(DEPLOYMENT_ID_EXPORT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order_is_total() {
        let mut stage = StageName::Source;
        let mut seen = vec![stage];
        while let Some(next) = stage.next() {
            seen.push(next);
            stage = next;
        }
        assert_eq!(seen, StageName::ORDER);
    }

    #[test]
    fn test_rollback_eligibility_starts_at_create_deployment() {
        assert!(!StageName::Source.triggers_rollback());
        assert!(!StageName::Build.triggers_rollback());
        assert!(StageName::CreateDeployment.triggers_rollback());
        assert!(StageName::Approval.triggers_rollback());
        assert!(StageName::RerouteTraffic.triggers_rollback());
    }

    #[test]
    fn test_deployment_id_export_roundtrip() {
        let result = StageResult::succeeded(StageName::CreateDeployment, Utc::now())
            .with_export(DEPLOYMENT_ID_EXPORT, "d-1001");

        assert_eq!(result.deployment_id(), Some("d-1001"));
        assert_eq!(result.export("OTHER"), None);
    }
}
