//! quilombo-core - Core library for Quilombo
//!
//! Local durable storage, the reconciliation engine, and the sync status
//! facade shared by all Quilombo interfaces.

pub mod backup;
pub mod db;
pub mod error;
pub mod models;
pub mod remote;
pub mod sync;
pub mod util;

pub use error::{Error, Result};
pub use models::{Conflict, EntityKind, SyncStatus};
