//! The budget store: single owner of the in-memory budget and its sync
//! metadata. Cloning a [`BudgetStore`] hands out another handle to the same
//! state.

mod persist;
mod remote;

pub(crate) use persist::PersistedState;
pub(crate) use remote::{RemoteSync, SimulatedRemote, SyncError};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use futures::future::{BoxFuture, FutureExt, Shared};
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::analytics::{self, AnalyticsSnapshot, Warning};
use crate::db::{KeyValueStore, STORAGE_KEY};
use crate::models::{BudgetField, BudgetRecord, SyncStatus};
use persist::Autosave;

#[derive(Debug, Clone, Copy)]
pub(crate) struct StoreOptions {
    pub(crate) initially_online: bool,
    pub(crate) sync_timeout: Duration,
    pub(crate) autosave_debounce: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            initially_online: true,
            sync_timeout: Duration::from_secs(10),
            autosave_debounce: Duration::from_millis(250),
        }
    }
}

/// Point-in-time copy of everything the store holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StoreState {
    pub(crate) budget: BudgetRecord,
    pub(crate) sync_status: SyncStatus,
    pub(crate) is_online: bool,
    pub(crate) last_synced_at: Option<DateTime<Utc>>,
    pub(crate) is_hydrated: bool,
}

impl StoreState {
    fn fresh(is_online: bool) -> Self {
        Self {
            budget: BudgetRecord::new(),
            sync_status: SyncStatus::Local,
            is_online,
            last_synced_at: None,
            is_hydrated: false,
        }
    }

    fn persisted(&self) -> PersistedState {
        PersistedState {
            budget: self.budget.clone(),
            sync_status: self.sync_status,
            last_synced_at: self.last_synced_at,
            is_hydrated: self.is_hydrated,
        }
    }
}

struct Guarded {
    state: StoreState,
    /// Bumped whenever the budget record changes.
    edits: u64,
}

type SyncAttempt = Shared<BoxFuture<'static, bool>>;

struct Inner {
    guarded: Mutex<Guarded>,
    autosave: Autosave,
    remote: Arc<dyn RemoteSync>,
    sync_timeout: Duration,
    in_flight: Mutex<Option<SyncAttempt>>,
}

#[derive(Clone)]
pub(crate) struct BudgetStore {
    inner: Arc<Inner>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl BudgetStore {
    /// Load persisted state (or defaults when nothing is stored), start the
    /// autosave writer, and mark the store hydrated. Must run inside a tokio
    /// runtime.
    pub(crate) fn hydrate(
        storage: Box<dyn KeyValueStore>,
        remote: Arc<dyn RemoteSync>,
        options: StoreOptions,
    ) -> Result<Self> {
        let raw = storage
            .get(STORAGE_KEY)
            .context("Failed to load persisted budget")?;

        let mut state = StoreState::fresh(options.initially_online);
        match raw.map(|raw| PersistedState::from_json(&raw)) {
            None => debug!("No persisted budget; starting from defaults"),
            Some(Ok(persisted)) if persisted.budget.is_valid() => {
                state.budget = persisted.budget;
                state.sync_status = persisted.sync_status;
                state.last_synced_at = persisted.last_synced_at;
                info!(status = %state.sync_status, "Restored persisted budget");
            }
            Some(Ok(_)) => warn!("Persisted budget has negative or out-of-range amounts; starting from defaults"),
            Some(Err(e)) => {
                let msg = format!("{e:#}");
                warn!(error = %msg, "Discarding unreadable persisted budget");
            }
        }

        let autosave = Autosave::spawn(
            Arc::new(Mutex::new(storage)),
            state.persisted(),
            options.autosave_debounce,
        );
        let store = Self {
            inner: Arc::new(Inner {
                guarded: Mutex::new(Guarded { state, edits: 0 }),
                autosave,
                remote,
                sync_timeout: options.sync_timeout,
                in_flight: Mutex::new(None),
            }),
        };
        store.set_hydrated(true);
        Ok(store)
    }

    // ── Reads ─────────────────────────────────────────────────

    pub(crate) fn snapshot(&self) -> StoreState {
        lock(&self.inner.guarded).state.clone()
    }

    pub(crate) fn budget(&self) -> BudgetRecord {
        lock(&self.inner.guarded).state.budget.clone()
    }

    pub(crate) fn sync_status(&self) -> SyncStatus {
        lock(&self.inner.guarded).state.sync_status
    }

    pub(crate) fn is_online(&self) -> bool {
        lock(&self.inner.guarded).state.is_online
    }

    pub(crate) fn last_synced_at(&self) -> Option<DateTime<Utc>> {
        lock(&self.inner.guarded).state.last_synced_at
    }

    pub(crate) fn is_hydrated(&self) -> bool {
        lock(&self.inner.guarded).state.is_hydrated
    }

    pub(crate) fn analytics(&self) -> AnalyticsSnapshot {
        analytics::compute_analytics(&self.budget())
    }

    pub(crate) fn warnings(&self) -> Vec<Warning> {
        analytics::compute_warnings(&self.budget())
    }

    // ── Mutations ─────────────────────────────────────────────

    /// Callers validate `value` (finite, non-negative) before it gets here.
    pub(crate) fn update_field(&self, field: BudgetField, value: Decimal) {
        debug_assert!(value >= Decimal::ZERO, "negative amount for {field}");
        self.inner.mutate(|g| {
            let budget = &mut g.state.budget;
            budget.set(field, value);
            budget.updated_at = Utc::now().max(budget.updated_at);
            g.state.sync_status = SyncStatus::Pending;
            g.edits += 1;
        });
        debug!(%field, %value, "Budget field updated");
    }

    /// Authoritative refresh from storage or a remote copy.
    pub(crate) fn replace_record(&self, budget: BudgetRecord) {
        self.inner.mutate(|g| {
            g.state.budget = budget;
            g.state.sync_status = SyncStatus::Synced;
            g.edits += 1;
        });
        info!("Budget record replaced");
    }

    pub(crate) fn set_online_status(&self, is_online: bool) {
        lock(&self.inner.guarded).state.is_online = is_online;
    }

    pub(crate) fn set_sync_status(&self, status: SyncStatus) {
        self.inner.mutate(|g| g.state.sync_status = status);
    }

    pub(crate) fn set_last_synced_at(&self, timestamp: DateTime<Utc>) {
        self.inner.mutate(|g| g.state.last_synced_at = Some(timestamp));
    }

    pub(crate) fn set_hydrated(&self, hydrated: bool) {
        self.inner.mutate(|g| g.state.is_hydrated = hydrated);
    }

    // ── Sync ──────────────────────────────────────────────────

    /// Mirror the budget to the remote. Returns whether the mirror succeeded;
    /// failures are logged and leave the status `pending`. A call made while
    /// another is still running joins that attempt instead of pushing again.
    pub(crate) async fn sync_to_server(&self) -> bool {
        let attempt = {
            let mut in_flight = lock(&self.inner.in_flight);
            match in_flight.as_ref() {
                Some(attempt) => {
                    debug!("Sync already in flight; joining it");
                    attempt.clone()
                }
                None => {
                    let inner = Arc::clone(&self.inner);
                    let attempt = async move {
                        let synced = inner.run_sync().await;
                        *lock(&inner.in_flight) = None;
                        synced
                    }
                    .boxed()
                    .shared();
                    *in_flight = Some(attempt.clone());
                    attempt
                }
            }
        };
        attempt.await
    }

    /// Wait for the autosave writer to catch up with the current state.
    pub(crate) async fn flush(&self) -> Result<()> {
        self.inner.autosave.flush().await
    }
}

impl Inner {
    /// Apply a change and queue the result for persistence. Publishing under
    /// the lock keeps autosave revisions in mutation order.
    fn mutate(&self, f: impl FnOnce(&mut Guarded)) {
        let mut guarded = lock(&self.guarded);
        f(&mut guarded);
        self.autosave.publish(guarded.state.persisted());
    }

    async fn run_sync(&self) -> bool {
        let (budget, edits) = {
            let mut guarded = lock(&self.guarded);
            if !guarded.state.is_online {
                debug!("Offline; budget stays pending");
                guarded.state.sync_status = SyncStatus::Pending;
                self.autosave.publish(guarded.state.persisted());
                return false;
            }
            (guarded.state.budget.clone(), guarded.edits)
        };

        info!("Syncing budget to remote");
        let outcome = match tokio::time::timeout(self.sync_timeout, self.remote.push(&budget)).await {
            Ok(result) => result,
            Err(_) => Err(SyncError::Timeout(self.sync_timeout)),
        };

        let mut guarded = lock(&self.guarded);
        let synced = match outcome {
            Ok(()) => {
                guarded.state.last_synced_at = Some(Utc::now());
                if guarded.edits == edits {
                    guarded.state.sync_status = SyncStatus::Synced;
                    info!("Budget synced");
                } else {
                    debug!("Budget changed during sync; status left as is");
                }
                true
            }
            Err(e) => {
                warn!(error = %e, "Sync failed; budget stays pending");
                guarded.state.sync_status = SyncStatus::Pending;
                false
            }
        };
        self.autosave.publish(guarded.state.persisted());
        synced
    }
}
