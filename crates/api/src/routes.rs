use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/geolocation/ip", get(handlers::lookup_without_query))
        .route("/geolocation/ip/", get(handlers::lookup_without_query))
        .route("/geolocation/ip/{query}", get(handlers::lookup_location))
        .route("/cache/stats", get(handlers::get_cache_stats))
        .with_state(state)
}
