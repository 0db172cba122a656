//! Data models for Quilombo

mod anotacao;
mod conflict;
mod cursista;
mod entity_kind;
mod formador;
mod municipio;
mod reuniao;
mod status;
mod supervisor;
mod sync_queue;
mod tutor;

pub use anotacao::Anotacao;
pub use conflict::Conflict;
pub use cursista::Cursista;
pub use entity_kind::EntityKind;
pub use formador::Formador;
pub use municipio::Municipio;
pub use reuniao::Reuniao;
pub use status::SyncStatus;
pub use supervisor::Supervisor;
pub use sync_queue::{SyncOperation, SyncQueueItem};
pub use tutor::Tutor;

use crate::error::{Error, Result};

/// Generic record form shared by the local store, the reconciliation engine,
/// and the backup format: one JSON object per row.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Serialize a typed model into its generic record form.
pub fn to_record<T: serde::Serialize>(value: &T) -> Result<Record> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(Error::InvalidInput(format!(
            "expected a JSON object record, got {other}"
        ))),
    }
}

/// Integer id carried by every stored record.
pub fn record_id(record: &Record) -> Option<i64> {
    record.get("id").and_then(serde_json::Value::as_i64)
}

/// Contact-email natural key, when the record carries a non-empty one.
pub fn record_email(record: &Record) -> Option<&str> {
    record
        .get("email")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|email| !email.is_empty())
}
