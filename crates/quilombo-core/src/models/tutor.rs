//! Tutor record

use serde::{Deserialize, Serialize};

use super::Municipio;

/// A tutor assigned to a municipality.
///
/// The `email` field doubles as the natural key during reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tutor {
    pub id: i64,
    pub nome: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    pub municipio_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_atuacao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formacao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experiencia_anos: Option<i64>,
    pub created_at: String,
    /// Denormalized join data; never replayed to the remote store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub municipios: Option<Municipio>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_are_omitted_from_records() {
        let tutor = Tutor {
            id: 1,
            nome: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            telefone: None,
            municipio_id: 1,
            area_atuacao: None,
            formacao: None,
            experiencia_anos: None,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            municipios: None,
        };

        let json = serde_json::to_string(&tutor).unwrap();
        assert!(!json.contains("telefone"));
        assert!(!json.contains("municipios"));
    }
}
