use std::path::Path;

use quilombo_core::db::LibSqlSettingsRepository;
use quilombo_core::models::{record_email, Conflict};
use quilombo_core::sync::load_conflicts;

use crate::cli::KeepChoice;
use crate::commands::common::{open_database, open_service, ConflictListItem};
use crate::error::CliError;

pub async fn run_conflicts(as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path).await?;
    let settings = LibSqlSettingsRepository::new(db.connection());
    let conflicts = load_conflicts(&settings).await?;

    if as_json {
        let items = conflicts
            .iter()
            .map(conflict_to_item)
            .collect::<Vec<ConflictListItem>>();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if conflicts.is_empty() {
        println!("No unresolved conflicts.");
        return Ok(());
    }

    for conflict in &conflicts {
        println!("{}", format_conflict_line(conflict));
    }
    println!();
    println!("Resolve with: quilombo resolve <table> <local-id> --keep local|remote");
    Ok(())
}

pub async fn run_resolve(
    table: &str,
    local_id: i64,
    keep: KeepChoice,
    db_path: &Path,
) -> Result<(), CliError> {
    let service = open_service(db_path).await?;

    let conflicts = service.conflicts().await?;
    let conflict = conflicts
        .iter()
        .find(|conflict| conflict.matches(table, local_id))
        .ok_or_else(|| CliError::ConflictNotFound {
            table: table.to_string(),
            local_id,
        })?;

    service
        .resolve_conflict(conflict, keep == KeepChoice::Local)
        .await?;

    match keep {
        KeepChoice::Local => println!("Conflict resolved; local data now on the remote store."),
        KeepChoice::Remote => println!("Conflict resolved; remote data kept."),
    }
    Ok(())
}

fn conflict_to_item(conflict: &Conflict) -> ConflictListItem {
    ConflictListItem {
        table: conflict.table.clone(),
        local_id: conflict.local_id(),
        local_email: record_email(&conflict.local).map(str::to_string),
        remote_id: conflict.remote_id(),
    }
}

fn format_conflict_line(conflict: &Conflict) -> String {
    let local_id = conflict
        .local_id()
        .map_or_else(|| "-".to_string(), |id| id.to_string());
    let email = record_email(&conflict.local).unwrap_or("-");
    format!("{}  local {local_id}  <{email}>", conflict.table)
}
