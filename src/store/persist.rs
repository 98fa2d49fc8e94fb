use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, error};

use crate::db::{KeyValueStore, STORAGE_KEY};
use crate::models::{BudgetRecord, SyncStatus};

/// The document written under [`STORAGE_KEY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PersistedState {
    pub(crate) budget: BudgetRecord,
    pub(crate) sync_status: SyncStatus,
    pub(crate) last_synced_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub(crate) is_hydrated: bool,
}

impl PersistedState {
    pub(crate) fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Failed to parse persisted budget")
    }

    pub(crate) fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize budget state")
    }
}

pub(crate) type SharedStorage = Arc<Mutex<Box<dyn KeyValueStore>>>;

#[derive(Debug, Clone, Default)]
struct WriteAck {
    revision: u64,
    error: Option<String>,
}

/// Write-behind persistence. Each published state bumps a revision; a single
/// writer task persists only the newest revision it sees, so bursts of edits
/// collapse into one write and at most one write is in flight.
pub(crate) struct Autosave {
    tx: watch::Sender<(u64, PersistedState)>,
    acks: watch::Receiver<WriteAck>,
}

impl Autosave {
    /// Must be called from within a tokio runtime.
    pub(crate) fn spawn(storage: SharedStorage, initial: PersistedState, debounce: Duration) -> Self {
        let (tx, rx) = watch::channel((0, initial));
        let (ack_tx, acks) = watch::channel(WriteAck::default());
        tokio::spawn(run_writer(rx, storage, debounce, ack_tx));
        Self { tx, acks }
    }

    pub(crate) fn publish(&self, state: PersistedState) {
        self.tx.send_modify(|(revision, current)| {
            *revision += 1;
            *current = state;
        });
    }

    /// Wait until everything published so far has reached storage.
    pub(crate) async fn flush(&self) -> Result<()> {
        let target = self.tx.borrow().0;
        let mut acks = self.acks.clone();
        let ack = acks
            .wait_for(|ack| ack.revision >= target)
            .await
            .map_err(|_| anyhow!("Autosave writer stopped before flushing"))?
            .clone();
        match ack.error {
            Some(e) if ack.revision == target => bail!("Failed to persist budget state: {e}"),
            _ => Ok(()),
        }
    }
}

async fn run_writer(
    mut rx: watch::Receiver<(u64, PersistedState)>,
    storage: SharedStorage,
    debounce: Duration,
    acks: watch::Sender<WriteAck>,
) {
    while rx.changed().await.is_ok() {
        if !debounce.is_zero() {
            tokio::time::sleep(debounce).await;
        }
        let (revision, state) = rx.borrow_and_update().clone();
        let error = match write_state(Arc::clone(&storage), state).await {
            Ok(()) => {
                debug!(revision, "Budget state persisted");
                None
            }
            Err(e) => {
                let msg = format!("{e:#}");
                error!(revision, error = %msg, "Failed to persist budget state");
                Some(msg)
            }
        };
        acks.send_replace(WriteAck { revision, error });
    }
    debug!("Autosave writer stopped");
}

async fn write_state(storage: SharedStorage, state: PersistedState) -> Result<()> {
    let json = state.to_json()?;
    tokio::task::spawn_blocking(move || {
        let mut storage = storage.lock().unwrap_or_else(PoisonError::into_inner);
        storage.set(STORAGE_KEY, &json)
    })
    .await
    .context("Autosave write task failed")?
}
