//! Trainee record

use serde::{Deserialize, Serialize};

use super::Municipio;

/// A course trainee enrolled through a municipality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cursista {
    pub id: i64,
    pub nome: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    pub municipio_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escola: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cargo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curso_interesse: Option<String>,
    pub created_at: String,
    /// Denormalized join data; never replayed to the remote store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub municipios: Option<Municipio>,
}
