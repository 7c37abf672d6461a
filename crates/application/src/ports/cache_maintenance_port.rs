use async_trait::async_trait;
use geoquery_domain::DomainError;

/// Outcome of a cache compaction cycle.
#[derive(Debug, Default, Clone)]
pub struct CacheCompactionOutcome {
    pub entries_removed: usize,
    pub cache_size: usize,
}

/// Port for in-memory tier maintenance.
#[async_trait]
pub trait CacheMaintenancePort: Send + Sync {
    /// Remove entries whose access window has lapsed to reclaim memory.
    async fn run_compaction_cycle(&self) -> Result<CacheCompactionOutcome, DomainError>;
}
