//! Approval DTOs

use serde::{Deserialize, Serialize};

use crate::domain::approval::ApprovalDecision;

/// Operator decision submitted against a run's approval gate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalRequest {
    pub decision: ApprovalDecision,
    pub comment: Option<String>,
}
