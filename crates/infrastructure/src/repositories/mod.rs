pub mod geo_record_repository;

pub use geo_record_repository::SqliteGeoRecordRepository;
