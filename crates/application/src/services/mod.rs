mod cache_metrics;
mod record_cache;
mod tiered_lookup;

pub use cache_metrics::{CacheMetrics, CacheMetricsSnapshot};
pub use record_cache::{CacheLookup, RecordCache};
pub use tiered_lookup::{Resolved, ResolvedFrom, TieredLookupCache};
