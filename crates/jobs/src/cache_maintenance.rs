use geoquery_application::ports::CacheMaintenancePort;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

const DEFAULT_COMPACTION_INTERVAL_SECS: u64 = 300;

/// Periodically sweeps idle entries out of the in-memory tier.
pub struct CacheMaintenanceJob {
    maintenance: Arc<dyn CacheMaintenancePort>,
    compaction_interval_secs: u64,
    shutdown: CancellationToken,
}

impl CacheMaintenanceJob {
    pub fn new(maintenance: Arc<dyn CacheMaintenancePort>) -> Self {
        Self {
            maintenance,
            compaction_interval_secs: DEFAULT_COMPACTION_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, compaction_secs: u64) -> Self {
        self.compaction_interval_secs = compaction_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.compaction_interval_secs,
            "Starting cache compaction job"
        );

        tokio::spawn(async move {
            let period = Duration::from_secs(self.compaction_interval_secs.max(1));
            // The first tick of `interval` fires immediately; skip it.
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("CacheMaintenanceJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match self.maintenance.run_compaction_cycle().await {
                            Ok(outcome) if outcome.entries_removed > 0 => {
                                info!(
                                    entries_removed = outcome.entries_removed,
                                    cache_size = outcome.cache_size,
                                    "Cache compaction cycle completed"
                                );
                            }
                            Ok(outcome) => {
                                debug!(cache_size = outcome.cache_size, "Nothing to compact");
                            }
                            Err(e) => {
                                error!(error = %e, "Cache compaction cycle failed");
                            }
                        }
                    }
                }
            }
        });
    }
}
