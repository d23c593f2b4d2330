//! Approval gates
//!
//! One gate per run, created when the Approval stage starts and consumed
//! exactly once. The HTTP surface resolves gates; the Approval stage awaits
//! them.

use std::collections::HashMap;
use std::sync::Mutex;

use greenline_core::domain::approval::ApprovalDecision;
use tokio::sync::oneshot;
use uuid::Uuid;

/// Registry of pending approval gates, keyed by run id
#[derive(Default)]
pub struct ApprovalRegistry {
    gates: Mutex<HashMap<Uuid, oneshot::Sender<ApprovalDecision>>>,
}

impl ApprovalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a gate for a run, returning the receiving half
    ///
    /// Re-registering a run replaces its previous gate; the old receiver
    /// observes a closed channel.
    pub fn register(&self, run_id: Uuid) -> oneshot::Receiver<ApprovalDecision> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(run_id, tx);
        rx
    }

    /// Resolves a pending gate with the operator's decision
    ///
    /// Returns false when no gate is pending for the run (unknown run, not
    /// yet at the approval stage, or already decided).
    pub fn resolve(&self, run_id: Uuid, decision: ApprovalDecision) -> bool {
        let Some(gate) = self.gates.lock().unwrap().remove(&run_id) else {
            return false;
        };
        gate.send(decision).is_ok()
    }

    /// Discards a gate whose stage stopped waiting (approval timeout)
    pub fn abandon(&self, run_id: Uuid) {
        self.gates.lock().unwrap().remove(&run_id);
    }

    /// Whether a gate is currently pending for a run
    pub fn is_pending(&self, run_id: Uuid) -> bool {
        self.gates.lock().unwrap().contains_key(&run_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_gate_is_consumed_exactly_once() {
        let registry = ApprovalRegistry::new();
        let run_id = Uuid::new_v4();

        let rx = registry.register(run_id);
        assert!(registry.is_pending(run_id));

        assert!(registry.resolve(run_id, ApprovalDecision::Approved));
        assert_eq!(rx.await.unwrap(), ApprovalDecision::Approved);

        // The gate is gone; a second decision has nothing to land on.
        assert!(!registry.resolve(run_id, ApprovalDecision::Rejected));
        assert!(!registry.is_pending(run_id));
    }

    #[test]
    fn test_resolve_unknown_run() {
        let registry = ApprovalRegistry::new();
        assert!(!registry.resolve(Uuid::new_v4(), ApprovalDecision::Approved));
    }

    #[tokio::test]
    async fn test_abandon_closes_the_gate() {
        let registry = ApprovalRegistry::new();
        let run_id = Uuid::new_v4();

        let rx = registry.register(run_id);
        registry.abandon(run_id);

        assert!(rx.await.is_err());
        assert!(!registry.resolve(run_id, ApprovalDecision::Approved));
    }
}
