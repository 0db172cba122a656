//! Connectivity prober
//!
//! Fixed-period polling against a known-small remote collection. The
//! platform offers no push signal in this process model, so polling is the
//! primary mechanism rather than a fallback.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::SyncService;
use crate::remote::RemoteStore;

/// Probe period between reachability checks.
pub const PROBE_INTERVAL: Duration = Duration::from_secs(30);

/// The region list: small, always present, cheap to select one row from.
pub const PROBE_TABLE: &str = "municipios";

/// Handle to a running prober task; probing stops when the handle is
/// stopped or dropped.
pub struct ProberHandle {
    task: JoinHandle<()>,
}

impl ProberHandle {
    /// Stop probing immediately.
    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for ProberHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl<R> SyncService<R>
where
    R: RemoteStore + Send + Sync + 'static,
{
    /// Spawn the periodic connectivity probe.
    ///
    /// The first probe fires immediately; afterwards one probe per
    /// `interval`. Transitions and the reconnect auto-sync side effect are
    /// handled by [`SyncService::poll_connectivity`].
    pub fn start_prober(&self, interval: Duration) -> ProberHandle {
        let service = self.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(error) = service.poll_connectivity().await {
                    tracing::debug!("Connectivity probe failed: {error}");
                }
            }
        });
        ProberHandle { task }
    }
}
