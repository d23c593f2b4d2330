//! Approval gate domain types

use serde::{Deserialize, Serialize};

/// Binary decision recorded against a run's approval gate
///
/// Consumed exactly once; a rejected gate fails the run and triggers
/// rollback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApprovalDecision {
    Approved,
    Rejected,
}
