//! Local data backup helpers
//!
//! One JSON object keyed by collection name, each value the collection's
//! record array. Import blind-overwrites matching collections; unknown
//! top-level keys are reported, not imported.

use crate::db::{Collection, LocalStore};
use crate::error::{Error, Result};
use crate::models::Record;

/// Outcome of an import.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Collections overwritten
    pub collections: usize,
    /// Records written across those collections
    pub records: usize,
    /// Top-level keys that matched no known collection
    pub skipped: Vec<String>,
}

/// Render every local collection into the backup document.
pub async fn render_backup(store: &impl LocalStore) -> Result<String> {
    let mut root = serde_json::Map::new();
    for collection in Collection::ALL {
        let records = store.get_all(collection).await?;
        let rows = records
            .into_iter()
            .map(serde_json::Value::Object)
            .collect::<Vec<_>>();
        root.insert(
            collection.name().to_string(),
            serde_json::Value::Array(rows),
        );
    }
    Ok(serde_json::to_string_pretty(&serde_json::Value::Object(
        root,
    ))?)
}

/// Overwrite local collections from a backup document.
pub async fn import_backup(store: &impl LocalStore, raw: &str) -> Result<ImportSummary> {
    let parsed: serde_json::Value = serde_json::from_str(raw)?;
    let serde_json::Value::Object(root) = parsed else {
        return Err(Error::InvalidInput(
            "backup file must be a JSON object keyed by table name".to_string(),
        ));
    };

    let mut summary = ImportSummary::default();
    for (key, value) in root {
        let Some(collection) = Collection::from_name(&key) else {
            summary.skipped.push(key);
            continue;
        };
        let serde_json::Value::Array(rows) = value else {
            return Err(Error::InvalidInput(format!(
                "backup entry '{key}' must be an array of records"
            )));
        };

        store.clear(collection).await?;
        for row in rows {
            let serde_json::Value::Object(record) = row else {
                return Err(Error::InvalidInput(format!(
                    "backup entry '{key}' contains a non-object record"
                )));
            };
            store.put(collection, &record).await?;
            summary.records += 1;
        }
        summary.collections += 1;
    }

    Ok(summary)
}

/// Build a deterministic default file name for backup flows.
#[must_use]
pub fn suggested_backup_file_name(timestamp_ms: i64) -> String {
    format!("quilombo-backup-{timestamp_ms}.json")
}
