use async_trait::async_trait;
use geoquery_domain::{DomainError, GeoRecord};

/// Durable keyed storage of resolved records.
///
/// The lookup key (`GeoRecord::query`) is the primary identity: at most one
/// record exists per key and records are never deleted.
#[async_trait]
pub trait GeoRecordRepository: Send + Sync {
    /// Finds the record stored for `query`.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(GeoRecord))` - If a record exists for this key
    /// * `Ok(None)` - If the key has never been persisted
    /// * `Err(DomainError)` - If the store cannot be queried
    async fn find_by_query(&self, query: &str) -> Result<Option<GeoRecord>, DomainError>;

    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// * `DomainError::DuplicateRecord` - If a record for this key already exists
    /// * `DomainError::DatabaseError` - If a database error occurs
    async fn create(&self, record: GeoRecord) -> Result<GeoRecord, DomainError>;
}
