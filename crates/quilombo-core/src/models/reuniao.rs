//! Meeting record

use serde::{Deserialize, Serialize};

use super::Municipio;

/// A meeting with a municipal education office.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reuniao {
    pub id: i64,
    pub titulo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    pub data_reuniao: String,
    pub municipio_id: i64,
    pub secretario_nome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secretario_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secretario_telefone: Option<String>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
    pub created_at: String,
    /// Denormalized join data; never replayed to the remote store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub municipios: Option<Municipio>,
}
