mod cache_maintenance_port;
mod geo_record_repository;
mod origin_client;

pub use cache_maintenance_port::{CacheCompactionOutcome, CacheMaintenancePort};
pub use geo_record_repository::GeoRecordRepository;
pub use origin_client::OriginClient;

// Re-export for convenience
pub use geoquery_domain::GeoRecord;
