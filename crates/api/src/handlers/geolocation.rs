use crate::{errors::ApiError, state::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use geoquery_domain::GeoRecord;
use std::sync::Arc;
use tracing::instrument;

#[instrument(skip(state), name = "api_lookup_location")]
pub async fn lookup_location(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> Result<Json<Arc<GeoRecord>>, ApiError> {
    let record = state.lookup.execute(&query).await?;
    Ok(Json(record))
}

/// `/geolocation/ip` with no key segment.
pub async fn lookup_without_query(
    State(state): State<AppState>,
) -> Result<Json<Arc<GeoRecord>>, ApiError> {
    let record = state.lookup.execute("").await?;
    Ok(Json(record))
}
