//! Entity kind enumeration and table naming

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The five domain entity classes, in reconciliation order.
///
/// Serialized with the remote table name so annotation records round-trip
/// through JSON with the same `entity_type` strings the backend uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    #[serde(rename = "reunioes")]
    Reuniao,
    #[serde(rename = "tutores")]
    Tutor,
    #[serde(rename = "supervisores")]
    Supervisor,
    #[serde(rename = "cursistas")]
    Cursista,
    #[serde(rename = "formadores")]
    Formador,
}

impl EntityKind {
    /// Base entities first; annotation tables follow this same order.
    pub const ALL: [Self; 5] = [
        Self::Reuniao,
        Self::Tutor,
        Self::Supervisor,
        Self::Cursista,
        Self::Formador,
    ];

    /// Remote and local table name for the entity collection.
    pub const fn table_name(self) -> &'static str {
        match self {
            Self::Reuniao => "reunioes",
            Self::Tutor => "tutores",
            Self::Supervisor => "supervisores",
            Self::Cursista => "cursistas",
            Self::Formador => "formadores",
        }
    }

    /// Remote table holding this entity's annotations.
    pub const fn annotation_table_name(self) -> &'static str {
        match self {
            Self::Reuniao => "anotacoes_reunioes",
            Self::Tutor => "anotacoes_tutores",
            Self::Supervisor => "anotacoes_supervisores",
            Self::Cursista => "anotacoes_cursistas",
            Self::Formador => "anotacoes_formadores",
        }
    }

    /// Foreign-key column linking an annotation row to its parent entity
    /// in the remote annotation table.
    pub const fn annotation_foreign_key(self) -> &'static str {
        match self {
            Self::Reuniao => "reuniao_id",
            Self::Tutor => "tutor_id",
            Self::Supervisor => "supervisor_id",
            Self::Cursista => "cursista_id",
            Self::Formador => "formador_id",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reuniao" | "reunioes" => Ok(Self::Reuniao),
            "tutor" | "tutores" => Ok(Self::Tutor),
            "supervisor" | "supervisores" => Ok(Self::Supervisor),
            "cursista" | "cursistas" => Ok(Self::Cursista),
            "formador" | "formadores" => Ok(Self::Formador),
            other => Err(format!("unknown entity kind: {other}")),
        }
    }
}
