use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::models::BudgetRecord;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum SyncError {
    #[error("remote sync timed out after {0:?}")]
    Timeout(Duration),

    #[error("remote rejected the budget: {0}")]
    Rejected(String),

    #[error("transport error: {0}")]
    Transport(String),
}

/// The remote mirror. The payload is the serialized budget record; any
/// non-error return counts as an acknowledgement.
#[async_trait]
pub(crate) trait RemoteSync: Send + Sync {
    async fn push(&self, budget: &BudgetRecord) -> Result<(), SyncError>;
}

/// Stand-in for a real backend: serializes the payload, waits out a fixed
/// round trip, and acknowledges. Like a real server it refuses records with
/// negative or out-of-range amounts. Nothing leaves the process.
pub(crate) struct SimulatedRemote {
    delay: Duration,
}

impl SimulatedRemote {
    pub(crate) fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl RemoteSync for SimulatedRemote {
    async fn push(&self, budget: &BudgetRecord) -> Result<(), SyncError> {
        if !budget.is_valid() {
            return Err(SyncError::Rejected("amounts out of range".to_string()));
        }
        let payload =
            serde_json::to_string(budget).map_err(|e| SyncError::Transport(e.to_string()))?;
        debug!(bytes = payload.len(), delay_ms = self.delay.as_millis() as u64, "Simulated push");
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}
