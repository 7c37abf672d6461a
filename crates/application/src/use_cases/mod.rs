pub mod cache;
pub mod geolocation;

pub use cache::GetCacheStatsUseCase;
pub use geolocation::LookupLocationUseCase;
