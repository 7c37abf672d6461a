use super::cache_metrics::{CacheMetrics, CacheMetricsSnapshot};
use super::record_cache::{CacheLookup, RecordCache};
use crate::ports::{
    CacheCompactionOutcome, CacheMaintenancePort, GeoRecordRepository, OriginClient,
};
use async_trait::async_trait;
use dashmap::DashMap;
use geoquery_domain::config::CacheConfig;
use geoquery_domain::{DomainError, GeoRecord};
use rustc_hash::FxBuildHasher;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

type LoadOutcome = Result<Arc<GeoRecord>, DomainError>;
type InflightSender = Arc<watch::Sender<Option<LoadOutcome>>>;
type InflightMap = DashMap<Arc<str>, InflightSender, FxBuildHasher>;

/// Which tier answered a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedFrom {
    Memory,
    Store,
    Origin,
    /// Shared outcome of a load another caller was already running.
    Inflight,
}

#[derive(Debug, Clone)]
pub struct Resolved {
    pub record: Arc<GeoRecord>,
    pub source: ResolvedFrom,
}

enum Loaded {
    StoreHit(GeoRecord),
    OriginFetch { record: GeoRecord, stored: bool },
}

enum InflightSlot {
    Leader(InflightSender),
    Follower(watch::Receiver<Option<LoadOutcome>>),
}

/// Owns one registration in the in-flight map. Only the sender this guard
/// registered is ever removed, so a finished leader cannot release the slot
/// of a newer leader for the same key. Followers observing `None` start over.
struct InflightLeaderGuard {
    inflight: Arc<InflightMap>,
    key: Arc<str>,
    tx: InflightSender,
}

impl InflightLeaderGuard {
    fn release(&self) -> bool {
        self.inflight
            .remove_if(&self.key, |_, registered| Arc::ptr_eq(registered, &self.tx))
            .is_some()
    }

    fn publish(&self, outcome: LoadOutcome) {
        if self.release() {
            let _ = self.tx.send(Some(outcome));
        }
    }
}

impl Drop for InflightLeaderGuard {
    fn drop(&mut self) {
        if self.release() {
            let _ = self.tx.send(None);
        }
    }
}

/// Memory → store → origin lookup with per-key single-flight loading.
pub struct TieredLookupCache {
    memory: RecordCache,
    store: Arc<dyn GeoRecordRepository>,
    origin: Arc<dyn OriginClient>,
    inflight: Arc<InflightMap>,
    metrics: Arc<CacheMetrics>,
}

impl TieredLookupCache {
    pub fn new(
        config: &CacheConfig,
        store: Arc<dyn GeoRecordRepository>,
        origin: Arc<dyn OriginClient>,
    ) -> Result<Self, DomainError> {
        let memory = RecordCache::new(config.max_entries, config.expire_after_access())?;

        info!(
            max_entries = memory.capacity(),
            expire_after_access_secs = ?memory.expire_after_access().map(|d| d.as_secs()),
            "Lookup cache initialized"
        );

        Ok(Self {
            memory,
            store,
            origin,
            inflight: Arc::new(DashMap::with_hasher(FxBuildHasher)),
            metrics: Arc::new(CacheMetrics::default()),
        })
    }

    pub async fn resolve(&self, key: &str) -> Result<Arc<GeoRecord>, DomainError> {
        self.resolve_traced(key).await.map(|resolved| resolved.record)
    }

    /// Same as [`resolve`](Self::resolve), also reporting which tier answered.
    pub async fn resolve_traced(&self, key: &str) -> Result<Resolved, DomainError> {
        if let Some(record) = self.check_memory(key) {
            return Ok(Resolved {
                record,
                source: ResolvedFrom::Memory,
            });
        }

        let key: Arc<str> = Arc::from(key);
        loop {
            let rx = match self.register_or_join_inflight(&key) {
                InflightSlot::Leader(tx) => return self.resolve_as_leader(key, tx).await,
                InflightSlot::Follower(rx) => rx,
            };

            if let Some(outcome) = self.resolve_as_follower(&key, rx).await {
                return outcome.map(|record| Resolved {
                    record,
                    source: ResolvedFrom::Inflight,
                });
            }

            debug!(query = %key, "In-flight load abandoned, retrying");
        }
    }

    fn check_memory(&self, key: &str) -> Option<Arc<GeoRecord>> {
        match self.memory.get(key) {
            CacheLookup::Hit(record) => {
                CacheMetrics::incr(&self.metrics.hits);
                debug!(query = %key, "Cache HIT");
                Some(record)
            }
            CacheLookup::Expired => {
                CacheMetrics::incr(&self.metrics.expirations);
                CacheMetrics::incr(&self.metrics.misses);
                debug!(query = %key, "Cache EXPIRED");
                None
            }
            CacheLookup::Miss => {
                CacheMetrics::incr(&self.metrics.misses);
                debug!(query = %key, "Cache MISS");
                None
            }
        }
    }

    fn register_or_join_inflight(&self, key: &Arc<str>) -> InflightSlot {
        match self.inflight.entry(Arc::clone(key)) {
            dashmap::Entry::Occupied(e) => {
                let rx = e.get().subscribe();
                drop(e);
                InflightSlot::Follower(rx)
            }
            dashmap::Entry::Vacant(e) => {
                let (tx, _rx) = watch::channel(None::<LoadOutcome>);
                let tx = Arc::new(tx);
                e.insert(Arc::clone(&tx));
                InflightSlot::Leader(tx)
            }
        }
    }

    async fn resolve_as_follower(
        &self,
        key: &str,
        mut rx: watch::Receiver<Option<LoadOutcome>>,
    ) -> Option<LoadOutcome> {
        CacheMetrics::incr(&self.metrics.coalesced_waits);
        debug!(query = %key, "Joining in-flight load");

        // A closed channel still leaves the last published value readable.
        let _ = rx.changed().await;
        let outcome = rx.borrow().clone();
        outcome
    }

    async fn resolve_as_leader(
        &self,
        key: Arc<str>,
        tx: InflightSender,
    ) -> Result<Resolved, DomainError> {
        let guard = InflightLeaderGuard {
            inflight: Arc::clone(&self.inflight),
            key: Arc::clone(&key),
            tx,
        };

        // Another leader may have finished between our miss and registration.
        if let CacheLookup::Hit(record) = self.memory.get(&key) {
            guard.publish(Ok(Arc::clone(&record)));
            drop(guard);
            return Ok(Resolved {
                record,
                source: ResolvedFrom::Memory,
            });
        }

        let result = match self.load(&key).await {
            Ok(Loaded::StoreHit(record)) => {
                let record = Arc::new(record);
                self.store_in_memory(&key, &record);
                Ok(Resolved {
                    record,
                    source: ResolvedFrom::Store,
                })
            }
            Ok(Loaded::OriginFetch { record, stored }) => {
                let record = Arc::new(record);
                if stored {
                    self.store_in_memory(&key, &record);
                }
                Ok(Resolved {
                    record,
                    source: ResolvedFrom::Origin,
                })
            }
            Err(e) => Err(e),
        };

        let outcome = match &result {
            Ok(resolved) => Ok(Arc::clone(&resolved.record)),
            Err(e) => Err(e.clone()),
        };
        guard.publish(outcome);

        drop(guard);
        result
    }

    async fn load(&self, key: &Arc<str>) -> Result<Loaded, DomainError> {
        match self.store.find_by_query(key).await {
            Ok(Some(mut record)) => {
                record.mark_persisted();
                CacheMetrics::incr(&self.metrics.store_hits);
                info!(query = %key, "Store HIT");
                return Ok(Loaded::StoreHit(record));
            }
            Ok(None) => {}
            Err(e) => {
                CacheMetrics::incr(&self.metrics.store_failures);
                error!(query = %key, error = %e, "Store lookup failed");
                return Err(e);
            }
        }

        let mut record = match self.origin.fetch(key).await {
            Ok(record) => record,
            Err(e) => {
                CacheMetrics::incr(&self.metrics.origin_failures);
                error!(query = %key, error = %e, "Origin lookup failed");
                return Err(e);
            }
        };
        CacheMetrics::incr(&self.metrics.origin_fetches);

        if *record.query != **key {
            debug!(query = %key, reported = %record.query, "Origin reported a different query, keeping lookup key");
            record.query = Arc::clone(key);
        }
        if record.is_success() {
            info!(query = %key, status = ?record.status, "Origin FETCH");
        } else {
            warn!(query = %key, status = ?record.status, "Origin FETCH reported an unsuccessful lookup");
        }

        let stored = match self.store.create(record.to_persisted()).await {
            Ok(_) => true,
            Err(DomainError::DuplicateRecord(msg)) => {
                CacheMetrics::incr(&self.metrics.persist_failures);
                error!(query = %key, error = %msg, "Duplicate store write for a single-flight load");
                false
            }
            Err(e) => {
                CacheMetrics::incr(&self.metrics.persist_failures);
                warn!(query = %key, error = %e, "Failed to persist origin record");
                false
            }
        };

        Ok(Loaded::OriginFetch { record, stored })
    }

    fn store_in_memory(&self, key: &Arc<str>, record: &Arc<GeoRecord>) {
        CacheMetrics::incr(&self.metrics.insertions);
        if let Some(evicted) = self.memory.insert(Arc::clone(key), Arc::clone(record)) {
            CacheMetrics::incr(&self.metrics.evictions);
            debug!(query = %key, evicted = %evicted, "Cache EVICT");
        }
    }

    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot(
            self.memory.len(),
            self.memory.capacity(),
            self.memory.expire_after_access().map(|d| d.as_secs()),
        )
    }

    /// Whether `key` is live in memory, without touching its recency.
    pub fn is_cached(&self, key: &str) -> bool {
        self.memory.contains(key)
    }

    /// Keys held in memory, most recently used first.
    pub fn cached_keys(&self) -> Vec<Arc<str>> {
        self.memory.keys()
    }

    pub fn len(&self) -> usize {
        self.memory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }

    pub fn inflight_count(&self) -> usize {
        self.inflight.len()
    }
}

#[async_trait]
impl CacheMaintenancePort for TieredLookupCache {
    async fn run_compaction_cycle(&self) -> Result<CacheCompactionOutcome, DomainError> {
        let entries_removed = self.memory.purge_expired();
        CacheMetrics::add(&self.metrics.expirations, entries_removed);
        CacheMetrics::incr(&self.metrics.compactions);

        let cache_size = self.memory.len();
        if entries_removed > 0 {
            debug!(entries_removed, cache_size, "Compaction removed expired entries");
        }

        Ok(CacheCompactionOutcome {
            entries_removed,
            cache_size,
        })
    }
}
