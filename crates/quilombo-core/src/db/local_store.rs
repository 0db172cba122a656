//! Local collection store

use libsql::{params, Connection};

use crate::error::{Error, Result};
use crate::models::{record_id, EntityKind, Record};

/// Logical collections held by the local store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Reunioes,
    Tutores,
    Supervisores,
    Cursistas,
    Formadores,
    Anotacoes,
}

impl Collection {
    /// Every record-bearing collection, in schema order.
    pub const ALL: [Self; 6] = [
        Self::Reunioes,
        Self::Tutores,
        Self::Supervisores,
        Self::Cursistas,
        Self::Formadores,
        Self::Anotacoes,
    ];

    /// Backing table name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Reunioes => "reunioes",
            Self::Tutores => "tutores",
            Self::Supervisores => "supervisores",
            Self::Cursistas => "cursistas",
            Self::Formadores => "formadores",
            Self::Anotacoes => "anotacoes",
        }
    }

    /// Parse a collection from its table name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    const fn is_annotations(self) -> bool {
        matches!(self, Self::Anotacoes)
    }
}

impl From<EntityKind> for Collection {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Reuniao => Self::Reunioes,
            EntityKind::Tutor => Self::Tutores,
            EntityKind::Supervisor => Self::Supervisores,
            EntityKind::Cursista => Self::Cursistas,
            EntityKind::Formador => Self::Formadores,
        }
    }
}

/// Trait for local record storage operations (async)
#[allow(async_fn_in_trait)]
pub trait LocalStore {
    /// All records in a collection, ordered by id
    async fn get_all(&self, collection: Collection) -> Result<Vec<Record>>;

    /// A single record by id
    async fn get(&self, collection: Collection, id: i64) -> Result<Option<Record>>;

    /// Insert a record; fails fast when the id is already present
    async fn add(&self, collection: Collection, record: &Record) -> Result<()>;

    /// Upsert a record (last write wins)
    async fn put(&self, collection: Collection, record: &Record) -> Result<()>;

    /// Delete a record by id
    async fn delete(&self, collection: Collection, id: i64) -> Result<()>;

    /// Remove every record in a collection
    async fn clear(&self, collection: Collection) -> Result<()>;

    /// Number of records in a collection
    async fn count(&self, collection: Collection) -> Result<u64>;

    /// Annotations attached to one entity, via the composite index
    async fn annotations_for_entity(&self, kind: EntityKind, entity_id: i64) -> Result<Vec<Record>>;

    /// Annotations attached to any entity of one kind
    async fn annotations_for_kind(&self, kind: EntityKind) -> Result<Vec<Record>>;

    /// Number of annotations attached to entities of one kind
    async fn count_annotations(&self, kind: EntityKind) -> Result<u64>;

    /// Remove every annotation attached to entities of one kind
    async fn clear_annotations(&self, kind: EntityKind) -> Result<()>;
}

/// libSQL implementation of `LocalStore`
pub struct LibSqlLocalStore<'a> {
    conn: &'a Connection,
}

impl<'a> LibSqlLocalStore<'a> {
    /// Create a new store with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn require_id(collection: Collection, record: &Record) -> Result<i64> {
        record_id(record).ok_or_else(|| {
            Error::InvalidInput(format!(
                "record for '{}' is missing an integer id",
                collection.name()
            ))
        })
    }

    fn annotation_columns(record: &Record) -> Result<(String, i64)> {
        let entity_type = record
            .get("entity_type")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                Error::InvalidInput("annotation record is missing entity_type".to_string())
            })?;
        let entity_id = record
            .get("entity_id")
            .and_then(serde_json::Value::as_i64)
            .ok_or_else(|| {
                Error::InvalidInput("annotation record is missing entity_id".to_string())
            })?;
        Ok((entity_type, entity_id))
    }

    fn is_unique_violation(error: &libsql::Error) -> bool {
        error.to_string().contains("UNIQUE constraint failed")
    }

    async fn collect_records(&self, sql: &str, params: impl libsql::params::IntoParams) -> Result<Vec<Record>> {
        let mut rows = self.conn.query(sql, params).await?;
        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            let raw: String = row.get(0)?;
            records.push(serde_json::from_str(&raw)?);
        }
        Ok(records)
    }

    async fn insert(
        &self,
        collection: Collection,
        record: &Record,
        or_replace: bool,
    ) -> Result<()> {
        let id = Self::require_id(collection, record)?;
        let body = serde_json::to_string(record)?;
        let verb = if or_replace {
            "INSERT OR REPLACE"
        } else {
            "INSERT"
        };

        let result = if collection.is_annotations() {
            let (entity_type, entity_id) = Self::annotation_columns(record)?;
            self.conn
                .execute(
                    &format!(
                        "{verb} INTO anotacoes (id, entity_type, entity_id, record) VALUES (?, ?, ?, ?)"
                    ),
                    params![id, entity_type, entity_id, body],
                )
                .await
        } else {
            self.conn
                .execute(
                    &format!("{verb} INTO {} (id, record) VALUES (?, ?)", collection.name()),
                    params![id, body],
                )
                .await
        };

        match result {
            Ok(_) => Ok(()),
            Err(error) if !or_replace && Self::is_unique_violation(&error) => {
                Err(Error::DuplicateId {
                    collection: collection.name().to_string(),
                    id,
                })
            }
            Err(error) => Err(error.into()),
        }
    }
}

impl LocalStore for LibSqlLocalStore<'_> {
    async fn get_all(&self, collection: Collection) -> Result<Vec<Record>> {
        self.collect_records(
            &format!("SELECT record FROM {} ORDER BY id", collection.name()),
            (),
        )
        .await
    }

    async fn get(&self, collection: Collection, id: i64) -> Result<Option<Record>> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT record FROM {} WHERE id = ?", collection.name()),
                params![id],
            )
            .await?;

        match rows.next().await? {
            Some(row) => {
                let raw: String = row.get(0)?;
                Ok(Some(serde_json::from_str(&raw)?))
            }
            None => Ok(None),
        }
    }

    async fn add(&self, collection: Collection, record: &Record) -> Result<()> {
        self.insert(collection, record, false).await
    }

    async fn put(&self, collection: Collection, record: &Record) -> Result<()> {
        self.insert(collection, record, true).await
    }

    async fn delete(&self, collection: Collection, id: i64) -> Result<()> {
        self.conn
            .execute(
                &format!("DELETE FROM {} WHERE id = ?", collection.name()),
                params![id],
            )
            .await?;
        Ok(())
    }

    async fn clear(&self, collection: Collection) -> Result<()> {
        self.conn
            .execute(&format!("DELETE FROM {}", collection.name()), ())
            .await?;
        Ok(())
    }

    async fn count(&self, collection: Collection) -> Result<u64> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT COUNT(*) FROM {}", collection.name()),
                (),
            )
            .await?;

        let count: i64 = match rows.next().await? {
            Some(row) => row.get(0)?,
            None => 0,
        };
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn annotations_for_entity(&self, kind: EntityKind, entity_id: i64) -> Result<Vec<Record>> {
        self.collect_records(
            "SELECT record FROM anotacoes WHERE entity_type = ? AND entity_id = ? ORDER BY id",
            params![kind.table_name(), entity_id],
        )
        .await
    }

    async fn annotations_for_kind(&self, kind: EntityKind) -> Result<Vec<Record>> {
        self.collect_records(
            "SELECT record FROM anotacoes WHERE entity_type = ? ORDER BY id",
            params![kind.table_name()],
        )
        .await
    }

    async fn count_annotations(&self, kind: EntityKind) -> Result<u64> {
        let mut rows = self
            .conn
            .query(
                "SELECT COUNT(*) FROM anotacoes WHERE entity_type = ?",
                params![kind.table_name()],
            )
            .await?;

        let count: i64 = match rows.next().await? {
            Some(row) => row.get(0)?,
            None => 0,
        };
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn clear_annotations(&self, kind: EntityKind) -> Result<()> {
        self.conn
            .execute(
                "DELETE FROM anotacoes WHERE entity_type = ?",
                params![kind.table_name()],
            )
            .await?;
        Ok(())
    }
}
