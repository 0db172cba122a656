//! Pending-change accounting

use crate::db::LocalStore;
use crate::error::Result;
use crate::models::EntityKind;

/// Total count of locally-stored records awaiting reconciliation: every
/// entity collection plus the annotation counts per entity kind.
///
/// Best-effort lower bound, not a transactional snapshot.
pub async fn count_pending(store: &impl LocalStore) -> Result<u64> {
    let mut total = 0u64;
    for kind in EntityKind::ALL {
        total += store.count(kind.into()).await?;
        total += store.count_annotations(kind).await?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Collection, Database, LibSqlLocalStore, LocalStore};
    use crate::models::{to_record, Anotacao, Record};

    fn record(id: i64) -> Record {
        let mut record = Record::new();
        record.insert("id".to_string(), serde_json::Value::from(id));
        record.insert("nome".to_string(), serde_json::Value::from("x"));
        record
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_empty_store_has_no_pending_changes() {
        let db = Database::open_in_memory().await.unwrap();
        let store = LibSqlLocalStore::new(db.connection());

        assert_eq!(count_pending(&store).await.unwrap(), 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_counts_entities_and_annotations() {
        let db = Database::open_in_memory().await.unwrap();
        let store = LibSqlLocalStore::new(db.connection());

        store.add(Collection::Tutores, &record(1)).await.unwrap();
        store.add(Collection::Tutores, &record(2)).await.unwrap();
        store.add(Collection::Reunioes, &record(3)).await.unwrap();

        let mut anotacao =
            to_record(&Anotacao::new_local(EntityKind::Tutor, 1, "t", "c", "a")).unwrap();
        anotacao.insert("id".to_string(), serde_json::Value::from(100));
        store.add(Collection::Anotacoes, &anotacao).await.unwrap();

        assert_eq!(count_pending(&store).await.unwrap(), 4);
    }
}
