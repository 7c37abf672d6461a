pub mod cache;

pub use cache::CacheStatsResponse;
