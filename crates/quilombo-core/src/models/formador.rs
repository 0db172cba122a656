//! Trainer record

use serde::{Deserialize, Serialize};

use super::Municipio;

/// A trainer delivering courses in a municipality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formador {
    pub id: i64,
    pub nome: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    pub municipio_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub especialidade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formacao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificacoes: Option<String>,
    pub created_at: String,
    /// Denormalized join data; never replayed to the remote store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub municipios: Option<Municipio>,
}
