//! Connectivity tracking. Feeds online/offline transitions into the store and
//! retries a pending sync once when the connection comes back.

use std::time::Duration;
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::models::SyncStatus;
use crate::store::BudgetStore;

/// Report a connectivity change. Returns the sync outcome when the change
/// triggered a retry.
pub(crate) async fn on_connectivity_change(store: &BudgetStore, online: bool) -> Option<bool> {
    store.set_online_status(online);
    if !online {
        info!("Connection lost");
        return None;
    }
    info!("Connection restored");
    if store.sync_status() == SyncStatus::Pending {
        Some(store.sync_to_server().await)
    } else {
        None
    }
}

/// A TCP handshake with `addr` within `timeout` counts as online.
pub(crate) async fn probe(addr: &str, timeout: Duration) -> bool {
    matches!(
        tokio::time::timeout(timeout, TcpStream::connect(addr)).await,
        Ok(Ok(_))
    )
}

const MIN_PROBE_INTERVAL: Duration = Duration::from_millis(10);

/// Poll `addr` every `interval` (never faster than 10ms). The first
/// observation only sets the flag; later observations are reported when they
/// differ from the previous one.
pub(crate) fn spawn_monitor(store: BudgetStore, addr: String, interval: Duration) -> JoinHandle<()> {
    let interval = interval.max(MIN_PROBE_INTERVAL);
    tokio::spawn(async move {
        let timeout = interval.min(Duration::from_secs(3));
        let mut last = probe(&addr, timeout).await;
        store.set_online_status(last);
        debug!(%addr, online = last, "Initial connectivity");

        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let online = probe(&addr, timeout).await;
            if online != last {
                last = online;
                on_connectivity_change(&store, online).await;
            }
        }
    })
}

#[cfg(test)]
#[path = "network_tests.rs"]
mod tests;
