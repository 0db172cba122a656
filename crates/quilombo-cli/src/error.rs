use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] quilombo_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),
    #[error("Unknown entity kind: {0}")]
    UnknownEntity(String),
    #[error("No conflict recorded for table '{table}' and local id {local_id}")]
    ConflictNotFound { table: String, local_id: i64 },
    #[error("Remote store is unreachable; nothing was synced")]
    RemoteUnreachable,
    #[error("Refusing to clear local data without --yes")]
    ClearNotConfirmed,
    #[error(
        "Remote store is not configured. Set SUPABASE_URL and SUPABASE_ANON_KEY to enable sync."
    )]
    RemoteNotConfigured,
}
