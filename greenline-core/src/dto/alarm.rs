//! Alarm notification DTOs

use serde::{Deserialize, Serialize};

/// State reported by the alarm system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmState {
    Ok,
    Alarm,
    InsufficientData,
}

/// Breach notification from the external alarm watcher
///
/// Correlated to a run by application name; an `Alarm` state initiates a
/// rollback of that application's active deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlarmNotification {
    pub alarm_name: String,
    pub application: String,
    pub state: AlarmState,
}

/// Outcome of processing an alarm notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlarmResponse {
    /// Deployment that was stopped, when the alarm led to a rollback
    pub deployment_id: Option<String>,
}
