//! Database layer for Quilombo

mod connection;
mod local_store;
mod migrations;
mod settings_repository;
mod sync_queue_repository;

pub use connection::Database;
pub use local_store::{Collection, LibSqlLocalStore, LocalStore};
pub use settings_repository::{LibSqlSettingsRepository, SettingsRepository};
pub use sync_queue_repository::{LibSqlSyncQueueRepository, SyncQueueRepository};
