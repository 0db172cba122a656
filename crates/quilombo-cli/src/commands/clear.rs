use std::path::Path;

use quilombo_core::db::{LibSqlLocalStore, LibSqlSettingsRepository, LocalStore};
use quilombo_core::sync::clear_conflicts;
use quilombo_core::EntityKind;

use crate::commands::common::open_database;
use crate::error::CliError;

pub async fn run_clear(confirmed: bool, db_path: &Path) -> Result<(), CliError> {
    if !confirmed {
        return Err(CliError::ClearNotConfirmed);
    }

    let db = open_database(db_path).await?;
    let store = LibSqlLocalStore::new(db.connection());
    for kind in EntityKind::ALL {
        store.clear(kind.into()).await?;
    }

    let settings = LibSqlSettingsRepository::new(db.connection());
    clear_conflicts(&settings).await?;

    println!("Local entity data cleared.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use quilombo_core::db::{Collection, Database};
    use quilombo_core::models::Record;

    fn unique_test_db_path() -> PathBuf {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |duration| duration.as_nanos());
        std::env::temp_dir().join(format!("quilombo-cli-clear-test-{timestamp}.db"))
    }

    fn record(id: i64) -> Record {
        let mut record = Record::new();
        record.insert("id".to_string(), serde_json::Value::from(id));
        record
    }

    fn anotacao(id: i64) -> Record {
        let mut record = record(id);
        record.insert("entity_type".to_string(), serde_json::Value::from("tutores"));
        record.insert("entity_id".to_string(), serde_json::Value::from(1));
        record
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn run_clear_requires_confirmation() {
        let db_path = unique_test_db_path();
        let error = run_clear(false, &db_path).await.unwrap_err();
        assert!(matches!(error, CliError::ClearNotConfirmed));
        let _ = std::fs::remove_file(db_path);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn run_clear_empties_entities_but_not_annotations() {
        let db_path = unique_test_db_path();
        {
            let db = Database::open(&db_path).await.unwrap();
            let store = LibSqlLocalStore::new(db.connection());
            store.add(Collection::Tutores, &record(1)).await.unwrap();
            store.add(Collection::Anotacoes, &anotacao(2)).await.unwrap();
        }

        run_clear(true, &db_path).await.unwrap();

        let db = Database::open(&db_path).await.unwrap();
        let store = LibSqlLocalStore::new(db.connection());
        assert_eq!(store.count(Collection::Tutores).await.unwrap(), 0);
        assert_eq!(store.count(Collection::Anotacoes).await.unwrap(), 1);

        let _ = std::fs::remove_file(&db_path);
        let _ = std::fs::remove_file(db_path.with_extension("db-shm"));
        let _ = std::fs::remove_file(db_path.with_extension("db-wal"));
    }
}
