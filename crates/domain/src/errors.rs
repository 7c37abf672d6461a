use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Empty query: {0}")]
    EmptyQuery(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Record already exists: {0}")]
    DuplicateRecord(String),

    #[error("Origin lookup service unavailable: {0}")]
    OriginUnavailable(String),

    #[error("Origin lookup timed out after {timeout_secs}s for {query}")]
    OriginTimeout { query: String, timeout_secs: u64 },

    #[error("Invalid origin response: {0}")]
    InvalidOriginResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
