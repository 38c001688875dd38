//! Record store trait for the fetch/mutation boundary

use crate::core::record::Record;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Service trait for the record collection behind one screen
///
/// The engine never mutates through this trait itself: screens create,
/// update and delete out-of-band, then re-fetch the full collection and hand
/// it to the engine wholesale. Implementations are agnostic to the record
/// shape: a record is an open attribute mapping.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch the full current collection
    async fn fetch(&self) -> Result<Vec<Record>>;

    /// Create a new record
    async fn create(&self, record: Record) -> Result<Record>;

    /// Update an existing record
    async fn update(&self, id: &Uuid, record: Record) -> Result<Record>;

    /// Delete a record
    async fn delete(&self, id: &Uuid) -> Result<()>;
}
