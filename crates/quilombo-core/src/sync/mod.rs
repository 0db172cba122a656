//! Offline-first synchronization core
//!
//! Pairs the local store with the reconciliation protocol: pending-change
//! accounting, the connectivity prober, per-table upload with conflict
//! detection, conflict resolution, and the aggregate status facade.

mod conflicts;
mod engine;
mod pending;
mod prober;
mod service;

pub use conflicts::{clear_conflicts, load_conflicts, store_conflicts, CONFLICTS_KEY};
pub use engine::{SyncEngine, SyncReport, TableError, LAST_SYNC_KEY};
pub use pending::count_pending;
pub use prober::{ProberHandle, PROBE_INTERVAL, PROBE_TABLE};
pub use service::SyncService;
