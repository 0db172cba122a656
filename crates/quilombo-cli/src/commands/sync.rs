use std::path::Path;

use crate::commands::common::open_service;
use crate::error::CliError;

pub async fn run_sync(db_path: &Path) -> Result<(), CliError> {
    let service = open_service(db_path).await?;

    if !service.check_connectivity().await {
        return Err(CliError::RemoteUnreachable);
    }

    let Some(report) = service.sync_all_data().await? else {
        println!("A sync pass is already in flight; nothing to do.");
        return Ok(());
    };

    println!("{} records synced", report.total_synced);
    if !report.conflicts.is_empty() {
        println!(
            "{} conflicts detected. Run `quilombo conflicts` to review.",
            report.conflicts.len()
        );
    }
    for error in &report.table_errors {
        eprintln!("Table {} failed: {}", error.table, error.message);
    }
    Ok(())
}
