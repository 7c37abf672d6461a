use crate::services::TieredLookupCache;
use geoquery_domain::{validate_query, DomainError, GeoRecord};
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct LookupLocationUseCase {
    cache: Arc<TieredLookupCache>,
}

impl LookupLocationUseCase {
    pub fn new(cache: Arc<TieredLookupCache>) -> Self {
        Self { cache }
    }

    /// Validates `raw` and resolves it through the lookup cache.
    #[instrument(skip(self))]
    pub async fn execute(&self, raw: &str) -> Result<Arc<GeoRecord>, DomainError> {
        let key = validate_query(raw)?;
        let record = self.cache.resolve(key).await?;

        debug!(
            query = %key,
            persisted = record.is_persisted(),
            "Location resolved"
        );

        Ok(record)
    }
}
