use geoquery_application::services::CacheMetricsSnapshot;
use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct CacheStatsResponse {
    pub total_entries: usize,
    pub capacity: usize,
    pub expire_after_access_secs: Option<u64>,
    pub hits: u64,
    pub misses: u64,
    pub expirations: u64,
    pub insertions: u64,
    pub evictions: u64,
    pub store_hits: u64,
    pub origin_fetches: u64,
    pub coalesced_waits: u64,
    pub store_failures: u64,
    pub origin_failures: u64,
    pub persist_failures: u64,
    pub compactions: u64,
    pub hit_rate: f64,
}

impl From<CacheMetricsSnapshot> for CacheStatsResponse {
    fn from(s: CacheMetricsSnapshot) -> Self {
        Self {
            total_entries: s.total_entries,
            capacity: s.capacity,
            expire_after_access_secs: s.expire_after_access_secs,
            hits: s.hits,
            misses: s.misses,
            expirations: s.expirations,
            insertions: s.insertions,
            evictions: s.evictions,
            store_hits: s.store_hits,
            origin_fetches: s.origin_fetches,
            coalesced_waits: s.coalesced_waits,
            store_failures: s.store_failures,
            origin_failures: s.origin_failures,
            persist_failures: s.persist_failures,
            compactions: s.compactions,
            hit_rate: s.hit_rate,
        }
    }
}
