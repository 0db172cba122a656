//! Error types for quilombo-core

use thiserror::Error;

/// Result type alias using quilombo-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in quilombo-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// libSQL error
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record not found
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Record id already present in a collection
    #[error("Duplicate id {id} in collection '{collection}'")]
    DuplicateId { collection: String, id: i64 },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Remote store HTTP transport error
    #[error("Remote HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote store API error (non-success response)
    #[error("Remote store error: {0}")]
    Remote(String),
}
