//! geoquery Domain Layer
pub mod config;
pub mod errors;
pub mod geo_record;
pub mod validators;

pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use geo_record::{GeoRecord, PERSISTED_MARKER};
pub use validators::validate_query;
