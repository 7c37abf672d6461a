use geoquery_domain::{DomainError, GeoRecord};
use lru::LruCache;
use rustc_hash::FxBuildHasher;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

struct CacheEntry {
    record: Arc<GeoRecord>,
    last_access: Instant,
}

/// Result of probing the in-memory tier.
#[derive(Debug, Clone)]
pub enum CacheLookup {
    Hit(Arc<GeoRecord>),
    /// The entry existed but its access window had lapsed; it has been dropped.
    Expired,
    Miss,
}

/// Bounded key → record map with LRU capacity eviction and
/// expire-after-access semantics.
///
/// Expiry is lazy: a lapsed entry is removed the next time it is looked up or
/// when [`RecordCache::purge_expired`] runs. The lock is never held across an
/// `.await`.
pub struct RecordCache {
    entries: Mutex<LruCache<Arc<str>, CacheEntry, FxBuildHasher>>,
    capacity: NonZeroUsize,
    expire_after_access: Option<Duration>,
}

impl RecordCache {
    pub fn new(
        max_entries: i64,
        expire_after_access: Option<Duration>,
    ) -> Result<Self, DomainError> {
        let capacity = usize::try_from(max_entries)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or_else(|| {
                DomainError::ConfigError(format!(
                    "cache capacity must be greater than 0 (got {max_entries})"
                ))
            })?;

        Ok(Self {
            entries: Mutex::new(LruCache::with_hasher(capacity, FxBuildHasher)),
            capacity,
            expire_after_access: expire_after_access.filter(|d| !d.is_zero()),
        })
    }

    #[inline]
    fn is_expired(&self, entry: &CacheEntry, now: Instant) -> bool {
        match self.expire_after_access {
            Some(window) => now.saturating_duration_since(entry.last_access) > window,
            None => false,
        }
    }

    /// Looks up `key`, promoting it to most-recently-used and restarting its
    /// access window on a hit.
    pub fn get(&self, key: &str) -> CacheLookup {
        let now = Instant::now();
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());

        let expired = match entries.get_mut(key) {
            None => return CacheLookup::Miss,
            Some(entry) if !self.is_expired(entry, now) => {
                entry.last_access = now;
                return CacheLookup::Hit(Arc::clone(&entry.record));
            }
            Some(_) => true,
        };

        if expired {
            entries.pop(key);
        }
        CacheLookup::Expired
    }

    /// Inserts or refreshes `key`. Returns the key evicted to make room, if any.
    pub fn insert(&self, key: Arc<str>, record: Arc<GeoRecord>) -> Option<Arc<str>> {
        let entry = CacheEntry {
            record,
            last_access: Instant::now(),
        };
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());

        match entries.push(Arc::clone(&key), entry) {
            Some((old_key, _)) if old_key != key => Some(old_key),
            _ => None,
        }
    }

    /// Whether `key` is live, without touching its recency.
    pub fn contains(&self, key: &str) -> bool {
        let now = Instant::now();
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries
            .peek(key)
            .is_some_and(|entry| !self.is_expired(entry, now))
    }

    /// Drops every entry whose access window has lapsed.
    pub fn purge_expired(&self) -> usize {
        if self.expire_after_access.is_none() {
            return 0;
        }

        let now = Instant::now();
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let expired: Vec<Arc<str>> = entries
            .iter()
            .filter(|(_, entry)| self.is_expired(entry, now))
            .map(|(key, _)| Arc::clone(key))
            .collect();

        for key in &expired {
            entries.pop(key);
        }
        expired.len()
    }

    /// Keys currently held, most recently used first. Lapsed entries not yet
    /// purged are included.
    pub fn keys(&self) -> Vec<Arc<str>> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.iter().map(|(key, _)| Arc::clone(key)).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    pub fn expire_after_access(&self) -> Option<Duration> {
        self.expire_after_access
    }
}
