pub mod cache;
pub mod geolocation;
pub mod health;

pub use cache::get_cache_stats;
pub use geolocation::{lookup_location, lookup_without_query};
pub use health::health_check;
