use std::path::Path;

use quilombo_core::db::{
    LibSqlLocalStore, LibSqlSettingsRepository, SettingsRepository,
};
use quilombo_core::sync::{count_pending, load_conflicts, LAST_SYNC_KEY};
use quilombo_core::SyncStatus;

use crate::commands::common::{format_relative_time, open_database, remote_from_env, open_service};
use crate::error::CliError;

pub async fn run_status(as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let status = match remote_from_env() {
        Ok(_) => {
            let service = open_service(db_path).await?;
            service.check_connectivity().await;
            service.status()
        }
        // Without remote configuration the local half of the status still
        // renders; the store is the source of truth for pending work
        Err(CliError::RemoteNotConfigured) => offline_status(db_path).await?,
        Err(error) => return Err(error),
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("Online:    {}", if status.is_online { "yes" } else { "no" });
    println!("Syncing:   {}", if status.is_syncing { "yes" } else { "no" });
    let last_sync = status.last_sync.map_or_else(
        || "never".to_string(),
        |then| format_relative_time(then, chrono::Utc::now().timestamp_millis()),
    );
    println!("Last sync: {last_sync}");
    println!("Pending:   {}", status.pending_changes);
    println!(
        "Conflicts: {}",
        if status.has_conflicts { "yes" } else { "no" }
    );
    Ok(())
}

async fn offline_status(db_path: &Path) -> Result<SyncStatus, CliError> {
    let db = open_database(db_path).await?;
    let store = LibSqlLocalStore::new(db.connection());
    let pending = count_pending(&store).await?;

    let settings = LibSqlSettingsRepository::new(db.connection());
    let has_conflicts = !load_conflicts(&settings).await?.is_empty();
    let last_sync = settings
        .get(LAST_SYNC_KEY)
        .await?
        .and_then(|raw| raw.parse::<i64>().ok());

    Ok(SyncStatus {
        is_online: false,
        is_syncing: false,
        last_sync,
        pending_changes: pending,
        has_conflicts,
    })
}
