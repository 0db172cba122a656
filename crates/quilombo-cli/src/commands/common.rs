use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use quilombo_core::db::{Collection, Database};
use quilombo_core::models::{record_email, record_id, Record};
use quilombo_core::remote::{HttpRemoteStore, RemoteConfig};
use quilombo_core::sync::SyncService;
use quilombo_core::EntityKind;
use serde::Serialize;

use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct ConflictListItem {
    pub table: String,
    pub local_id: Option<i64>,
    pub local_email: Option<String>,
    pub remote_id: Option<i64>,
}

pub fn resolve_db_path(cli_db_path: Option<PathBuf>) -> PathBuf {
    cli_db_path
        .or_else(|| env::var_os("QUILOMBO_DB_PATH").map(PathBuf::from))
        .unwrap_or_else(default_db_path)
}

pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quilombo")
        .join("quilombo.db")
}

pub async fn open_database(db_path: &Path) -> Result<Database, CliError> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    tracing::debug!("Opening local database at {}", db_path.display());
    Ok(Database::open(db_path).await?)
}

pub fn remote_from_env() -> Result<HttpRemoteStore, CliError> {
    let config = RemoteConfig::from_env();
    if !config.is_configured() {
        return Err(CliError::RemoteNotConfigured);
    }
    Ok(HttpRemoteStore::new(&config)?)
}

pub async fn open_service(db_path: &Path) -> Result<SyncService<HttpRemoteStore>, CliError> {
    let db = open_database(db_path).await?;
    let remote = Arc::new(remote_from_env()?);
    Ok(SyncService::from_database(db, remote).await?)
}

pub fn parse_collection(name: &str) -> Result<Collection, CliError> {
    Collection::from_name(name.trim())
        .ok_or_else(|| CliError::UnknownCollection(name.trim().to_string()))
}

pub fn parse_entity(name: &str) -> Result<EntityKind, CliError> {
    name.parse()
        .map_err(|_| CliError::UnknownEntity(name.trim().to_string()))
}

/// One terminal line per stored record: id, display label, email if any.
pub fn format_record_line(record: &Record) -> String {
    let id = record_id(record).unwrap_or_default();
    let label = record
        .get("nome")
        .or_else(|| record.get("titulo"))
        .and_then(serde_json::Value::as_str)
        .unwrap_or("-");

    record_email(record).map_or_else(
        || format!("{id}  {label}"),
        |email| format!("{id}  {label} <{email}>"),
    )
}

pub fn format_relative_time(then_ms: i64, now_ms: i64) -> String {
    let minutes = (now_ms - then_ms).max(0) / 60_000;
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    format!("{}d ago", hours / 24)
}
