//! In-memory implementation of RecordStore for testing and development

use crate::core::error::StoreError;
use crate::core::record::Record;
use crate::store::RecordStore;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory record store implementation
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
#[derive(Clone)]
pub struct InMemoryRecordStore {
    records: Arc<RwLock<HashMap<Uuid, Record>>>,
}

impl InMemoryRecordStore {
    /// Create a new in-memory record store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a store pre-populated with records
    pub fn with_records(records: Vec<Record>) -> Self {
        let map: HashMap<Uuid, Record> = records.into_iter().map(|r| (r.id, r)).collect();
        Self {
            records: Arc::new(RwLock::new(map)),
        }
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn fetch(&self) -> Result<Vec<Record>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.values().cloned().collect())
    }

    async fn create(&self, record: Record) -> Result<Record> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        tracing::debug!(id = %record.id, "Creating record");
        records.insert(record.id, record.clone());

        Ok(record)
    }

    async fn update(&self, id: &Uuid, updated: Record) -> Result<Record> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if !records.contains_key(id) {
            return Err(StoreError::NotFound { id: *id }.into());
        }

        let mut updated = updated;
        updated.id = *id;
        records.insert(*id, updated.clone());

        Ok(updated)
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        records.remove(id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(name: &str, amount: i64) -> Record {
        Record::new().field("name", name).field("amount", amount)
    }

    #[tokio::test]
    async fn test_create_and_fetch() {
        let store = InMemoryRecordStore::new();
        let record = asset("Laptop", 1200);

        let created = store.create(record.clone()).await.unwrap();
        assert_eq!(created, record);

        let all = store.fetch().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].text("name"), "Laptop");
    }

    #[tokio::test]
    async fn test_fetch_returns_full_collection() {
        let store = InMemoryRecordStore::new();
        store.create(asset("Laptop", 1200)).await.unwrap();
        store.create(asset("Printer", 300)).await.unwrap();

        let all = store.fetch().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_update_replaces_record() {
        let store = InMemoryRecordStore::new();
        let record = store.create(asset("Laptop", 1200)).await.unwrap();

        let mut changed = record.clone();
        changed.set("amount", 999i64);
        let updated = store.update(&record.id, changed).await.unwrap();
        assert_eq!(updated.number("amount"), 999.0);

        let all = store.fetch().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].number("amount"), 999.0);
    }

    #[tokio::test]
    async fn test_update_missing_record_fails() {
        let store = InMemoryRecordStore::new();
        let err = store
            .update(&Uuid::new_v4(), asset("Ghost", 0))
            .await
            .unwrap_err();

        let store_err = err.downcast_ref::<StoreError>().expect("typed store error");
        assert!(matches!(store_err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_preserves_the_keyed_id() {
        let store = InMemoryRecordStore::new();
        let record = store.create(asset("Laptop", 1200)).await.unwrap();

        // Payload carries a different id; the path id wins
        let payload = asset("Laptop", 800);
        let updated = store.update(&record.id, payload).await.unwrap();
        assert_eq!(updated.id, record.id);
    }

    #[tokio::test]
    async fn test_delete_record() {
        let store = InMemoryRecordStore::new();
        let record = store.create(asset("Laptop", 1200)).await.unwrap();

        store.delete(&record.id).await.unwrap();

        let all = store.fetch().await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = InMemoryRecordStore::new();
        let id = Uuid::new_v4();
        assert!(store.delete(&id).await.is_ok());
    }

    #[tokio::test]
    async fn test_with_records() {
        let store =
            InMemoryRecordStore::with_records(vec![asset("Laptop", 1200), asset("Printer", 300)]);
        assert_eq!(store.fetch().await.unwrap().len(), 2);
    }
}
