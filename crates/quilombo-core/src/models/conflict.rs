//! Sync conflict model

use serde::{Deserialize, Serialize};

use super::{record_id, Record};

/// A local/remote record pair sharing a natural key, awaiting manual
/// resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    /// Snapshot of the locally-created record
    pub local: Record,
    /// The remote row that already holds the natural key
    pub remote: Record,
    /// Remote table both records belong to
    pub table: String,
}

impl Conflict {
    /// Id of the local snapshot, the half of the identity used for removal.
    pub fn local_id(&self) -> Option<i64> {
        record_id(&self.local)
    }

    /// Id of the remote row, the key for a keep-local update.
    pub fn remote_id(&self) -> Option<i64> {
        record_id(&self.remote)
    }

    /// Conflicts are matched by table + local record id.
    pub fn matches(&self, table: &str, local_id: i64) -> bool {
        self.table == table && self.local_id() == Some(local_id)
    }
}
