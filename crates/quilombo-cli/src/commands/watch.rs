use std::path::Path;
use std::time::Duration;

use crate::commands::common::open_service;
use crate::error::CliError;

pub async fn run_watch(interval_secs: u64, db_path: &Path) -> Result<(), CliError> {
    let service = open_service(db_path).await?;
    let mut status = service.subscribe();

    let handle = service.start_prober(Duration::from_secs(interval_secs.max(1)));
    println!("Probing connectivity every {interval_secs}s. Ctrl-C to stop.");

    loop {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result?;
                break;
            }
            changed = status.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = status.borrow_and_update().clone();
                println!(
                    "online={} syncing={} pending={} conflicts={}",
                    snapshot.is_online,
                    snapshot.is_syncing,
                    snapshot.pending_changes,
                    snapshot.has_conflicts
                );
            }
        }
    }

    handle.stop();
    println!("Stopped.");
    Ok(())
}
