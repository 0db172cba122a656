//! Municipality reference record

use serde::{Deserialize, Serialize};

/// Region row every entity references; remote-managed reference data and
/// the connectivity-probe target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Municipio {
    pub id: i64,
    pub nome: String,
    pub estado: String,
    pub created_at: String,
}
