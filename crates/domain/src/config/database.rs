use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,

    /// Directory holding the SQL migrations applied at startup.
    #[serde(default = "default_migrations_path")]
    pub migrations_path: String,

    /// Seconds between passive WAL checkpoints (0 disables the job).
    #[serde(default = "default_wal_checkpoint_interval_secs")]
    pub wal_checkpoint_interval_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
            busy_timeout_secs: default_busy_timeout_secs(),
            migrations_path: default_migrations_path(),
            wal_checkpoint_interval_secs: default_wal_checkpoint_interval_secs(),
        }
    }
}

fn default_db_path() -> String {
    "./geoquery.db".to_string()
}

fn default_max_connections() -> u32 {
    8
}

fn default_busy_timeout_secs() -> u64 {
    5
}

fn default_migrations_path() -> String {
    "./migrations".to_string()
}

fn default_wal_checkpoint_interval_secs() -> u64 {
    300
}
