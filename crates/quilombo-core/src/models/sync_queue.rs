//! Sync queue item model

use serde::{Deserialize, Serialize};

use super::Record;

/// Kind of pending offline mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncOperation {
    Create,
    Update,
    Delete,
}

/// A queued offline mutation awaiting replay against the remote store.
///
/// Consumed and deleted on successful replay; retried with an incremented
/// attempt count otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncQueueItem {
    /// Auto-assigned queue key
    pub id: i64,
    pub operation: SyncOperation,
    /// Target entity table name
    pub entity: String,
    pub entity_id: i64,
    pub data: Record,
    /// Enqueue time (RFC 3339)
    pub timestamp: String,
    pub attempts: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}
