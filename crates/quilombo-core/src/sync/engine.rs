//! Reconciliation engine
//!
//! Moves locally-held records into the remote store, one table at a time,
//! detecting natural-key conflicts instead of overwriting remote rows.

use tokio::sync::Mutex;

use super::conflicts;
use crate::db::{
    Database, LibSqlLocalStore, LibSqlSettingsRepository, LocalStore, SettingsRepository,
};
use crate::error::Result;
use crate::models::{record_email, Conflict, EntityKind, Record};
use crate::remote::RemoteStore;
use crate::util::timestamp_millis_now;

/// Settings key holding the completion time of the last pass (Unix ms).
pub const LAST_SYNC_KEY: &str = "last_sync";

/// Fields never replayed verbatim: the local id, the creation timestamp,
/// and denormalized join data.
const STRIPPED_FIELDS: [&str; 3] = ["id", "created_at", "municipios"];

/// Where a sync target's records live in the local store.
#[derive(Debug, Clone, Copy)]
enum SyncSource {
    Entities(EntityKind),
    Annotations(EntityKind),
}

/// One remote table to reconcile.
#[derive(Debug, Clone, Copy)]
struct SyncTarget {
    remote_table: &'static str,
    source: SyncSource,
}

/// Base entity tables first, then the per-entity annotation tables.
fn sync_targets() -> Vec<SyncTarget> {
    let mut targets = Vec::with_capacity(EntityKind::ALL.len() * 2);
    for kind in EntityKind::ALL {
        targets.push(SyncTarget {
            remote_table: kind.table_name(),
            source: SyncSource::Entities(kind),
        });
    }
    for kind in EntityKind::ALL {
        targets.push(SyncTarget {
            remote_table: kind.annotation_table_name(),
            source: SyncSource::Annotations(kind),
        });
    }
    targets
}

/// A table whose pass failed before any per-record work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableError {
    pub table: String,
    pub message: String,
}

/// Aggregate outcome of one reconciliation pass.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Records inserted remotely across all tables
    pub total_synced: usize,
    /// Conflicts detected this pass (also persisted when non-empty)
    pub conflicts: Vec<Conflict>,
    /// Tables skipped due to table-level failures
    pub table_errors: Vec<TableError>,
    /// Completion time (Unix ms), also written to `last_sync`
    pub completed_at: i64,
}

#[derive(Default)]
struct TableOutcome {
    synced: usize,
    conflicts: Vec<Conflict>,
}

enum PushResult {
    Inserted,
    Conflicted(Record),
}

/// Drop the fields that must not reach the remote store.
pub(crate) fn strip_non_replayable(record: &Record) -> Record {
    let mut upload = record.clone();
    for field in STRIPPED_FIELDS {
        upload.remove(field);
    }
    upload
}

/// One reconciliation pass over all tables.
pub struct SyncEngine<'a, R> {
    db: &'a Mutex<Database>,
    remote: &'a R,
}

impl<'a, R: RemoteStore> SyncEngine<'a, R> {
    pub const fn new(db: &'a Mutex<Database>, remote: &'a R) -> Self {
        Self { db, remote }
    }

    /// Run the pass.
    ///
    /// Table-level failures are collected and do not abort the other tables;
    /// an error return means the pass itself failed (local store unusable)
    /// and no post-pass state was committed.
    pub async fn run(&self) -> Result<SyncReport> {
        let mut report = SyncReport::default();
        let mut synced_sources: Vec<SyncTarget> = Vec::new();

        for target in sync_targets() {
            match self.sync_table(target).await {
                Ok(outcome) => {
                    report.total_synced += outcome.synced;
                    report.conflicts.extend(outcome.conflicts);
                    synced_sources.push(target);
                }
                Err(error) => {
                    tracing::error!("Failed to sync table {}: {error}", target.remote_table);
                    report.table_errors.push(TableError {
                        table: target.remote_table.to_string(),
                        message: error.to_string(),
                    });
                }
            }
        }

        if report.total_synced > 0 {
            // Whole-table clear: once a table's pass reports any success its
            // local collection empties entirely, conflicting and failed
            // records included (their snapshots live on in the conflict set).
            for target in &synced_sources {
                self.clear_source(*target).await?;
            }
            tracing::info!("Synced {} records", report.total_synced);
        }

        if !report.conflicts.is_empty() {
            let db = self.db.lock().await;
            let settings = LibSqlSettingsRepository::new(db.connection());
            conflicts::store_conflicts(&settings, &report.conflicts).await?;
            tracing::warn!("{} conflicts detected", report.conflicts.len());
        }

        report.completed_at = timestamp_millis_now();
        {
            let db = self.db.lock().await;
            let settings = LibSqlSettingsRepository::new(db.connection());
            settings
                .set(LAST_SYNC_KEY, &report.completed_at.to_string())
                .await?;
        }

        Ok(report)
    }

    async fn sync_table(&self, target: SyncTarget) -> Result<TableOutcome> {
        let records = self.read_source(target).await?;
        if records.is_empty() {
            return Ok(TableOutcome::default());
        }

        // Table reachability check before any per-record traffic
        self.remote.probe(target.remote_table).await?;

        let mut outcome = TableOutcome::default();
        for record in records {
            match self.push_record(target, &record).await {
                Ok(PushResult::Inserted) => outcome.synced += 1,
                Ok(PushResult::Conflicted(remote)) => outcome.conflicts.push(Conflict {
                    local: record,
                    remote,
                    table: target.remote_table.to_string(),
                }),
                Err(error) => {
                    tracing::warn!(
                        "Skipping record in {}: {error}",
                        target.remote_table
                    );
                }
            }
        }

        Ok(outcome)
    }

    /// Existence-check-then-insert for one record, sequential on purpose:
    /// batching would reopen the duplicate-insert race the natural-key
    /// lookup exists to prevent.
    async fn push_record(&self, target: SyncTarget, record: &Record) -> Result<PushResult> {
        if let Some(email) = record_email(record) {
            if let Some(existing) = self
                .remote
                .find_by_email(target.remote_table, email)
                .await?
            {
                return Ok(PushResult::Conflicted(existing));
            }
        }

        let upload = prepare_upload(target, record);
        self.remote.insert(target.remote_table, &upload).await?;
        Ok(PushResult::Inserted)
    }

    async fn read_source(&self, target: SyncTarget) -> Result<Vec<Record>> {
        let db = self.db.lock().await;
        let store = LibSqlLocalStore::new(db.connection());
        match target.source {
            SyncSource::Entities(kind) => store.get_all(kind.into()).await,
            SyncSource::Annotations(kind) => store.annotations_for_kind(kind).await,
        }
    }

    async fn clear_source(&self, target: SyncTarget) -> Result<()> {
        let db = self.db.lock().await;
        let store = LibSqlLocalStore::new(db.connection());
        match target.source {
            SyncSource::Entities(kind) => store.clear(kind.into()).await,
            SyncSource::Annotations(kind) => store.clear_annotations(kind).await,
        }
    }
}

/// Strip non-replayable fields and, for annotations, swap the generic
/// entity reference for the remote table's foreign-key column.
fn prepare_upload(target: SyncTarget, record: &Record) -> Record {
    let mut upload = strip_non_replayable(record);
    if let SyncSource::Annotations(kind) = target.source {
        upload.remove("entity_type");
        if let Some(entity_id) = upload.remove("entity_id") {
            upload.insert(kind.annotation_foreign_key().to_string(), entity_id);
        }
    }
    upload
}
