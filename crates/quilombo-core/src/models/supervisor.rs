//! Supervisor record

use serde::{Deserialize, Serialize};

use super::Municipio;

/// A supervisor assigned to a municipality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supervisor {
    pub id: i64,
    pub nome: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    pub municipio_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_supervisao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formacao: Option<String>,
    pub created_at: String,
    /// Denormalized join data; never replayed to the remote store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub municipios: Option<Municipio>,
}
