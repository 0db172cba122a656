use std::path::Path;

use quilombo_core::db::{LibSqlLocalStore, LocalStore};

use crate::commands::common::{format_record_line, open_database, parse_collection};
use crate::error::CliError;

pub async fn run_list(collection: &str, as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let collection = parse_collection(collection)?;

    let db = open_database(db_path).await?;
    let store = LibSqlLocalStore::new(db.connection());
    let records = store.get_all(collection).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No local records in '{}'.", collection.name());
        return Ok(());
    }

    for record in &records {
        println!("{}", format_record_line(record));
    }
    Ok(())
}
