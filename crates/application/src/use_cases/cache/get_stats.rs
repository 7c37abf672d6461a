use crate::services::{CacheMetricsSnapshot, TieredLookupCache};
use std::sync::Arc;

pub struct GetCacheStatsUseCase {
    cache: Arc<TieredLookupCache>,
}

impl GetCacheStatsUseCase {
    pub fn new(cache: Arc<TieredLookupCache>) -> Self {
        Self { cache }
    }

    pub fn execute(&self) -> CacheMetricsSnapshot {
        self.cache.metrics_snapshot()
    }
}
