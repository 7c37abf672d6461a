use geoquery_api::AppState;
use geoquery_application::ports::{CacheMaintenancePort, GeoRecordRepository, OriginClient};
use geoquery_application::services::TieredLookupCache;
use geoquery_application::use_cases::{GetCacheStatsUseCase, LookupLocationUseCase};
use geoquery_domain::Config;
use geoquery_infrastructure::origin::HttpOriginClient;
use geoquery_infrastructure::repositories::SqliteGeoRecordRepository;
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct Services {
    pub cache: Arc<TieredLookupCache>,
    pub lookup: Arc<LookupLocationUseCase>,
    pub cache_stats: Arc<GetCacheStatsUseCase>,
}

impl Services {
    pub fn new(config: &Config, pool: SqlitePool) -> anyhow::Result<Self> {
        let store: Arc<dyn GeoRecordRepository> = Arc::new(SqliteGeoRecordRepository::new(pool));
        let origin: Arc<dyn OriginClient> = Arc::new(HttpOriginClient::new(&config.origin)?);

        let cache = Arc::new(TieredLookupCache::new(&config.cache, store, origin)?);

        Ok(Self {
            lookup: Arc::new(LookupLocationUseCase::new(Arc::clone(&cache))),
            cache_stats: Arc::new(GetCacheStatsUseCase::new(Arc::clone(&cache))),
            cache,
        })
    }

    pub fn maintenance_port(&self) -> Arc<dyn CacheMaintenancePort> {
        Arc::clone(&self.cache) as Arc<dyn CacheMaintenancePort>
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            lookup: Arc::clone(&self.lookup),
            cache_stats: Arc::clone(&self.cache_stats),
        }
    }
}
