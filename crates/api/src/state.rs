use geoquery_application::use_cases::{GetCacheStatsUseCase, LookupLocationUseCase};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub lookup: Arc<LookupLocationUseCase>,
    pub cache_stats: Arc<GetCacheStatsUseCase>,
}
