//! Cloud gateway wire types
//!
//! Request/response bodies of the account-local gateway fronting the identity
//! service, deployment service, compute registry, parameter store, and
//! notification topic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::deployment::DeploymentStatus;

/// Request to assume a target-account role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssumeRoleRequest {
    pub role_arn: String,
    pub session_name: String,
}

/// Credential set returned by the identity service
///
/// Wire-only representation; the engine converts it into the non-serializable
/// `DelegatedCredential` domain type immediately after receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialGrant {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Request to create a blue/green deployment from a published bundle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDeploymentRequest {
    pub application: String,
    pub deployment_group: String,
    pub bundle_key: String,
}

/// Response carrying the freshly issued deployment id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDeploymentResponse {
    pub deployment_id: String,
}

/// Deployment status report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentInfo {
    pub deployment_id: String,
    pub status: DeploymentStatus,
}

/// Request to stop a deployment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopDeploymentRequest {
    pub auto_rollback: bool,
}

/// Request to register a task definition revision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterTaskDefinitionRequest {
    pub task_definition: serde_json::Value,
}

/// Response carrying the registered task definition identifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDefinitionArn {
    pub task_definition_arn: String,
}

/// Parameter store value wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterValue {
    pub value: String,
}

/// Request to write a parameter, overwriting any previous value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PutParameterRequest {
    pub name: String,
    pub value: String,
}

/// Notification publish request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishNotificationRequest {
    pub topic: String,
    pub subject: String,
    pub message: String,
}
