use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

// align(64) keeps the hot counters on their own cache line.
#[derive(Default)]
#[repr(align(64))]
pub struct CacheMetrics {
    // Hot counters, updated on every lookup.
    pub hits: AtomicU64,
    pub misses: AtomicU64,
    _hot_pad: [u64; 6],

    // Cold counters.
    pub expirations: AtomicU64,
    pub insertions: AtomicU64,
    pub evictions: AtomicU64,
    pub store_hits: AtomicU64,
    pub origin_fetches: AtomicU64,
    pub coalesced_waits: AtomicU64,
    pub store_failures: AtomicU64,
    pub origin_failures: AtomicU64,
    pub persist_failures: AtomicU64,
    pub compactions: AtomicU64,
}

impl CacheMetrics {
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(AtomicOrdering::Relaxed) as f64;
        let total = hits + self.misses.load(AtomicOrdering::Relaxed) as f64;

        if total > 0.0 {
            (hits / total) * 100.0
        } else {
            0.0
        }
    }

    #[inline]
    pub(crate) fn incr(counter: &AtomicU64) {
        counter.fetch_add(1, AtomicOrdering::Relaxed);
    }

    #[inline]
    pub(crate) fn add(counter: &AtomicU64, n: usize) {
        counter.fetch_add(n as u64, AtomicOrdering::Relaxed);
    }

    pub fn snapshot(
        &self,
        total_entries: usize,
        capacity: usize,
        expire_after_access_secs: Option<u64>,
    ) -> CacheMetricsSnapshot {
        let load = |c: &AtomicU64| c.load(AtomicOrdering::Relaxed);
        CacheMetricsSnapshot {
            total_entries,
            capacity,
            expire_after_access_secs,
            hits: load(&self.hits),
            misses: load(&self.misses),
            expirations: load(&self.expirations),
            insertions: load(&self.insertions),
            evictions: load(&self.evictions),
            store_hits: load(&self.store_hits),
            origin_fetches: load(&self.origin_fetches),
            coalesced_waits: load(&self.coalesced_waits),
            store_failures: load(&self.store_failures),
            origin_failures: load(&self.origin_failures),
            persist_failures: load(&self.persist_failures),
            compactions: load(&self.compactions),
            hit_rate: self.hit_rate(),
        }
    }
}

/// Point-in-time copy of the lookup cache counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheMetricsSnapshot {
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
