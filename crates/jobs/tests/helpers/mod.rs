#![allow(dead_code)]

use async_trait::async_trait;
use geoquery_application::ports::{CacheCompactionOutcome, CacheMaintenancePort};
use geoquery_domain::DomainError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct MockCacheMaintenancePort {
    compaction_call_count: Arc<AtomicU64>,
    should_fail_compaction: Arc<RwLock<bool>>,
    compaction_outcome: Arc<RwLock<CacheCompactionOutcome>>,
}

impl MockCacheMaintenancePort {
    pub fn new() -> Self {
        Self {
            compaction_call_count: Arc::new(AtomicU64::new(0)),
            should_fail_compaction: Arc::new(RwLock::new(false)),
            compaction_outcome: Arc::new(RwLock::new(CacheCompactionOutcome::default())),
        }
    }

    pub fn with_compaction_outcome(mut self, outcome: CacheCompactionOutcome) -> Self {
        self.compaction_outcome = Arc::new(RwLock::new(outcome));
        self
    }

    pub fn compaction_call_count(&self) -> u64 {
        self.compaction_call_count.load(Ordering::Relaxed)
    }

    pub async fn set_should_fail_compaction(&self, fail: bool) {
        *self.should_fail_compaction.write().await = fail;
    }
}

impl Default for MockCacheMaintenancePort {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheMaintenancePort for MockCacheMaintenancePort {
    async fn run_compaction_cycle(&self) -> Result<CacheCompactionOutcome, DomainError> {
        self.compaction_call_count.fetch_add(1, Ordering::Relaxed);
        if *self.should_fail_compaction.read().await {
            return Err(DomainError::DatabaseError(
                "Mock compaction failure".to_string(),
            ));
        }
        Ok(self.compaction_outcome.read().await.clone())
    }
}
