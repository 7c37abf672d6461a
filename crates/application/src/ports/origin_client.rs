use async_trait::async_trait;
use geoquery_domain::{DomainError, GeoRecord};

/// Remote lookup service consulted when neither cache tier knows a key.
///
/// Implementations enforce their own timeout and report it as
/// `DomainError::OriginTimeout`.
#[async_trait]
pub trait OriginClient: Send + Sync {
    async fn fetch(&self, query: &str) -> Result<GeoRecord, DomainError>;
}
