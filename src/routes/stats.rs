//! Per-device aggregate statistics endpoint.
//!
//! EMBP sibling module exporting `GET /api/stats`: grouped averages,
//! extremes and counts over a rolling window, computed inside Postgres so
//! the full history never reaches the application layer.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use sqlx::PgPool;

use crate::{error::ApiError, models::DeviceStats, store, Config};

// ---

const DEFAULT_STATS_DAYS: i64 = 7;

pub fn router() -> Router<(PgPool, Config)> {
    // ---
    Router::new().route("/api/stats", get(get_stats))
}

#[derive(Debug, Deserialize)]
struct StatsQuery {
    days: Option<i64>,
    #[serde(rename = "deviceId")]
    device_id: Option<String>,
}

/// Handle `GET /api/stats`.
///
/// An empty array is a valid response when no readings fall in the window.
async fn get_stats(
    Query(params): Query<StatsQuery>,
    State((pool, config)): State<(PgPool, Config)>,
) -> Result<Json<Vec<DeviceStats>>, ApiError> {
    // ---
    let days = params.days.unwrap_or(DEFAULT_STATS_DAYS);

    let stats = store::aggregate(&pool, store::days_window(days), params.device_id.as_deref())
        .await
        .map_err(|e| ApiError::from_sqlx(e, config.expose_internal_errors))?;

    Ok(Json(stats))
}
