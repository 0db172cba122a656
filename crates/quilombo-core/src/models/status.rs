//! Aggregate sync status

use serde::{Deserialize, Serialize};

/// Process-wide sync state published to the UI layer.
///
/// Derived: recomputed after every connectivity probe, pending-count scan,
/// and reconciliation pass. Only `last_sync` and the conflict list outlive
/// the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SyncStatus {
    pub is_online: bool,
    pub is_syncing: bool,
    /// Completion time of the last reconciliation pass (Unix ms)
    pub last_sync: Option<i64>,
    pub pending_changes: u64,
    pub has_conflicts: bool,
}
