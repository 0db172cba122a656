use std::path::Path;

use quilombo_core::backup::{import_backup, render_backup};
use quilombo_core::db::LibSqlLocalStore;

use crate::commands::common::open_database;
use crate::error::CliError;

pub async fn run_export(output_path: Option<&Path>, db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path).await?;
    let store = LibSqlLocalStore::new(db.connection());
    let rendered = render_backup(&store).await?;

    if let Some(path) = output_path {
        std::fs::write(path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }
    Ok(())
}

pub async fn run_import(backup_path: &Path, db_path: &Path) -> Result<(), CliError> {
    let raw = std::fs::read_to_string(backup_path)?;

    let db = open_database(db_path).await?;
    let store = LibSqlLocalStore::new(db.connection());
    let summary = import_backup(&store, &raw).await?;

    println!(
        "Imported {} records into {} collections",
        summary.records, summary.collections
    );
    for key in &summary.skipped {
        eprintln!("Skipped unknown table '{key}'");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    use quilombo_core::db::{Collection, Database, LocalStore};
    use quilombo_core::models::Record;

    fn unique_test_db_path() -> PathBuf {
        static NEXT_TEST_DB_ID: AtomicU64 = AtomicU64::new(0);

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |duration| duration.as_nanos());
        let sequence = NEXT_TEST_DB_ID.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!("quilombo-cli-backup-test-{timestamp}-{sequence}.db"))
    }

    fn cleanup_db_files(path: &PathBuf) {
        let _ = std::fs::remove_file(path);
        let _ = std::fs::remove_file(path.with_extension("db-shm"));
        let _ = std::fs::remove_file(path.with_extension("db-wal"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn run_export_writes_backup_file() {
        let db_path = unique_test_db_path();
        {
            let db = Database::open(&db_path).await.unwrap();
            let store = LibSqlLocalStore::new(db.connection());
            let mut record = Record::new();
            record.insert("id".to_string(), serde_json::Value::from(1));
            record.insert("email".to_string(), serde_json::Value::from("a@x.com"));
            store.add(Collection::Tutores, &record).await.unwrap();
        }

        let output_path = std::env::temp_dir().join(format!(
            "quilombo-export-test-{}.json",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |duration| duration.as_nanos())
        ));

        run_export(Some(&output_path), &db_path).await.unwrap();

        let exported = std::fs::read_to_string(&output_path).unwrap();
        assert!(exported.contains("\"tutores\""));
        assert!(exported.contains("a@x.com"));

        let _ = std::fs::remove_file(output_path);
        cleanup_db_files(&db_path);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn run_import_overwrites_collections() {
        let db_path = unique_test_db_path();

        let backup_path = std::env::temp_dir().join(format!(
            "quilombo-import-test-{}.json",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |duration| duration.as_nanos())
        ));
        std::fs::write(
            &backup_path,
            r#"{"tutores": [{"id": 5, "nome": "Ana", "email": "ana@x.com"}]}"#,
        )
        .unwrap();

        run_import(&backup_path, &db_path).await.unwrap();

        let db = Database::open(&db_path).await.unwrap();
        let store = LibSqlLocalStore::new(db.connection());
        assert_eq!(store.count(Collection::Tutores).await.unwrap(), 1);

        let _ = std::fs::remove_file(backup_path);
        cleanup_db_files(&db_path);
    }
}
