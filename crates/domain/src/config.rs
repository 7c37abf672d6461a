//! Configuration module for geoquery
//!
//! This module contains all configuration structures organized by concern:
//! - `root`: Main configuration and CLI overrides
//! - `server`: HTTP binding
//! - `cache`: In-memory tier capacity and expiry
//! - `origin`: Remote lookup service
//! - `database`: Persistent store
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod cache;
pub mod database;
pub mod errors;
pub mod logging;
pub mod origin;
pub mod root;
pub mod server;

pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use origin::OriginConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
