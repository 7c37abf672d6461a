use crate::{dto::CacheStatsResponse, state::AppState};
use axum::{extract::State, Json};
use tracing::{debug, instrument};

#[instrument(skip(state), name = "api_get_cache_stats")]
pub async fn get_cache_stats(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let snapshot = state.cache_stats.execute();

    debug!(
        total_entries = snapshot.total_entries,
        hits = snapshot.hits,
        misses = snapshot.misses,
        hit_rate = snapshot.hit_rate,
        "Cache statistics retrieved"
    );

    Json(snapshot.into())
}
