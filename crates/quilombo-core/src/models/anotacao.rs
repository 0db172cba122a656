//! Annotation record

use serde::{Deserialize, Serialize};

use super::EntityKind;
use crate::util::{local_record_id, now_rfc3339};

/// Free-text note attached to exactly one parent entity.
///
/// Many annotations per entity; deleting the parent does not cascade here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anotacao {
    pub id: i64,
    pub entity_type: EntityKind,
    pub entity_id: i64,
    pub titulo: String,
    pub conteudo: String,
    pub autor: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Anotacao {
    /// Create a locally-stored annotation with a timestamp-derived id.
    pub fn new_local(
        entity_type: EntityKind,
        entity_id: i64,
        titulo: impl Into<String>,
        conteudo: impl Into<String>,
        autor: impl Into<String>,
    ) -> Self {
        Self {
            id: local_record_id(),
            entity_type,
            entity_id,
            titulo: titulo.into(),
            conteudo: conteudo.into(),
            autor: autor.into(),
            created_at: now_rfc3339(),
            updated_at: None,
        }
    }

    /// Stamp the update timestamp after an edit.
    pub fn touch(&mut self) {
        self.updated_at = Some(now_rfc3339());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_local_assigns_id_and_created_at() {
        let anotacao = Anotacao::new_local(EntityKind::Tutor, 7, "Visita", "Tudo certo", "Ana");

        assert!(anotacao.id > 0);
        assert_eq!(anotacao.entity_type, EntityKind::Tutor);
        assert_eq!(anotacao.entity_id, 7);
        assert!(anotacao.updated_at.is_none());
    }

    #[test]
    fn touch_sets_updated_at() {
        let mut anotacao = Anotacao::new_local(EntityKind::Cursista, 1, "t", "c", "a");
        anotacao.touch();
        assert!(anotacao.updated_at.is_some());
    }
}
