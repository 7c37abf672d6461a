use serde::{Deserialize, Serialize};
use std::time::Duration;

/// In-memory tier settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Maximum number of live entries. Must be greater than zero.
    #[serde(default = "default_max_entries")]
    pub max_entries: i64,

    /// Seconds an entry may sit unaccessed before it is treated as absent.
    /// Zero or negative disables time-based expiry.
    #[serde(default = "default_expire_after_access_secs")]
    pub expire_after_access_secs: i64,

    /// Interval of the background sweep of expired entries (0 disables it).
    #[serde(default = "default_compaction_interval_secs")]
    pub compaction_interval_secs: u64,
}

impl CacheConfig {
    pub fn expire_after_access(&self) -> Option<Duration> {
        if self.expire_after_access_secs > 0 {
            Some(Duration::from_secs(self.expire_after_access_secs as u64))
        } else {
            None
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            expire_after_access_secs: default_expire_after_access_secs(),
            compaction_interval_secs: default_compaction_interval_secs(),
        }
    }
}

fn default_max_entries() -> i64 {
    10_000
}

fn default_expire_after_access_secs() -> i64 {
    600
}

fn default_compaction_interval_secs() -> u64 {
    300
}
