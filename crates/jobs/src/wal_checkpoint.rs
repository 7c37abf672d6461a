use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Folds the store's write-ahead log back into the main database file.
pub struct WalCheckpointJob {
    pool: SqlitePool,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl WalCheckpointJob {
    pub fn new(pool: SqlitePool, interval_secs: u64) -> Self {
        Self {
            pool,
            interval_secs,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Runs one passive checkpoint, returning `(log_frames, checkpointed_frames)`.
    pub async fn checkpoint(&self) -> Result<(i64, i64), sqlx::Error> {
        let (_busy, log_frames, checkpointed): (i64, i64, i64) =
            sqlx::query_as("PRAGMA wal_checkpoint(PASSIVE)")
                .fetch_one(&self.pool)
                .await?;
        Ok((log_frames, checkpointed))
    }

    pub async fn start(self: Arc<Self>) {
        info!(interval_secs = self.interval_secs, "Starting WAL checkpoint job");

        tokio::spawn(async move {
            let period = Duration::from_secs(self.interval_secs.max(1));
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("WalCheckpointJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match self.checkpoint().await {
                            Ok((log_frames, checkpointed)) => {
                                info!(log_frames, checkpointed, "WAL checkpoint completed");
                            }
                            Err(e) => {
                                error!(error = %e, "WAL checkpoint failed");
                            }
                        }
                    }
                }
            }
        });
    }
}
