//! Offline mutation queue repository

use libsql::{params, Connection, Row};

use crate::error::{Error, Result};
use crate::models::{Record, SyncOperation, SyncQueueItem};
use crate::util::now_rfc3339;

/// Trait for sync queue operations (async)
#[allow(async_fn_in_trait)]
pub trait SyncQueueRepository {
    /// Record an offline mutation; returns the assigned queue id
    async fn enqueue(
        &self,
        operation: SyncOperation,
        entity: &str,
        entity_id: i64,
        data: &Record,
    ) -> Result<i64>;

    /// All queued mutations, oldest first
    async fn list(&self) -> Result<Vec<SyncQueueItem>>;

    /// Drop a queue item after successful replay
    async fn remove(&self, id: i64) -> Result<()>;

    /// Bump the attempt count and record the replay error
    async fn record_failure(&self, id: i64, error: &str) -> Result<()>;
}

/// libSQL implementation of `SyncQueueRepository`
pub struct LibSqlSyncQueueRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LibSqlSyncQueueRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn parse_item(row: &Row) -> Result<SyncQueueItem> {
        let operation: String = row.get(1)?;
        let operation: SyncOperation = serde_json::from_str(&format!("\"{operation}\""))
            .map_err(|_| Error::Database(format!("unknown sync operation '{operation}'")))?;
        let data: String = row.get(4)?;
        let attempts: i64 = row.get(6)?;
        let last_error = match row.get_value(7)? {
            libsql::Value::Text(text) => Some(text),
            _ => None,
        };

        Ok(SyncQueueItem {
            id: row.get(0)?,
            operation,
            entity: row.get(2)?,
            entity_id: row.get(3)?,
            data: serde_json::from_str(&data)?,
            timestamp: row.get(5)?,
            attempts: u32::try_from(attempts).unwrap_or_default(),
            last_error,
        })
    }
}

impl SyncQueueRepository for LibSqlSyncQueueRepository<'_> {
    async fn enqueue(
        &self,
        operation: SyncOperation,
        entity: &str,
        entity_id: i64,
        data: &Record,
    ) -> Result<i64> {
        let operation = serde_json::to_string(&operation)?;
        let operation = operation.trim_matches('"');

        self.conn
            .execute(
                "INSERT INTO sync_queue (operation, entity, entity_id, data, timestamp, attempts)
                 VALUES (?, ?, ?, ?, ?, 0)",
                params![
                    operation,
                    entity,
                    entity_id,
                    serde_json::to_string(data)?,
                    now_rfc3339()
                ],
            )
            .await?;

        Ok(self.conn.last_insert_rowid())
    }

    async fn list(&self) -> Result<Vec<SyncQueueItem>> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, operation, entity, entity_id, data, timestamp, attempts, last_error
                 FROM sync_queue ORDER BY id",
                (),
            )
            .await?;

        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(Self::parse_item(&row)?);
        }
        Ok(items)
    }

    async fn remove(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM sync_queue WHERE id = ?", params![id])
            .await?;
        Ok(())
    }

    async fn record_failure(&self, id: i64, error: &str) -> Result<()> {
        let rows = self
            .conn
            .execute(
                "UPDATE sync_queue SET attempts = attempts + 1, last_error = ? WHERE id = ?",
                params![error, id],
            )
            .await?;

        if rows == 0 {
            return Err(Error::NotFound(format!("sync queue item {id}")));
        }
        Ok(())
    }
}
