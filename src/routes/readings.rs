//! Sensor reading ingestion and query endpoints.
//!
//! EMBP sibling module exporting one subrouter to the gateway:
//! - `GET  /api/data`          – latest reading (404 when the store is empty)
//! - `GET  /api/data/history`  – paginated range query, newest first
//! - `POST /api/data`          – authenticated ingestion of one reading
//!
//! Validation runs synchronously before the insert, so a rejected reading
//! leaves no partial state behind. The write route alone carries the
//! API-key layer; reads are open.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::{
    auth,
    error::ApiError,
    models::{HistoryResponse, NewReading, Pagination, Reading},
    store, Config,
};

// ---

const DEFAULT_HISTORY_HOURS: i64 = 24;
const DEFAULT_PAGE_SIZE: u32 = 100;

pub fn router(pool: PgPool, config: Config) -> Router<(PgPool, Config)> {
    // ---
    let write = Router::new()
        .route("/api/data", post(submit_reading))
        .route_layer(middleware::from_fn_with_state(
            (pool, config),
            auth::require_api_key,
        ));

    Router::new()
        .route("/api/data", get(get_latest))
        .route("/api/data/history", get(get_history))
        .merge(write)
}

// ---

#[derive(Debug, Deserialize)]
struct LatestQuery {
    #[serde(rename = "deviceId")]
    device_id: Option<String>,
}

/// Handle `GET /api/data`.
async fn get_latest(
    Query(params): Query<LatestQuery>,
    State((pool, config)): State<(PgPool, Config)>,
) -> Result<Json<Reading>, ApiError> {
    // ---
    let reading = store::latest(&pool, params.device_id.as_deref())
        .await
        .map_err(|e| ApiError::from_sqlx(e, config.expose_internal_errors))?;

    reading
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("No sensor data available".to_string()))
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    hours: Option<i64>,
    limit: Option<u32>,
    page: Option<u32>,
    #[serde(rename = "deviceId")]
    device_id: Option<String>,
}

/// Handle `GET /api/data/history`.
///
/// Pages are 1-indexed; a page past the end of the range yields an empty
/// `data` array with the true total, not an error.
async fn get_history(
    Query(params): Query<HistoryQuery>,
    State((pool, config)): State<(PgPool, Config)>,
) -> Result<Json<HistoryResponse>, ApiError> {
    // ---
    let hours = params.hours.unwrap_or(DEFAULT_HISTORY_HOURS);
    let page = params.page.unwrap_or(1).max(1);
    let page_size = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).max(1);

    let (data, total) = store::query_range(
        &pool,
        store::hours_window(hours),
        params.device_id.as_deref(),
        page,
        page_size,
    )
    .await
    .map_err(|e| ApiError::from_sqlx(e, config.expose_internal_errors))?;

    debug!(
        "history query: {} of {} readings (page {page}, size {page_size})",
        data.len(),
        total
    );

    Ok(Json(HistoryResponse {
        data,
        pagination: Pagination {
            total,
            page,
            pages: store::page_count(total, page_size),
        },
    }))
}

/// Handle `POST /api/data`.
///
/// Presence of the required fields is enforced by deserialization and
/// reported as 400 before range validation runs.
async fn submit_reading(
    State((pool, config)): State<(PgPool, Config)>,
    payload: Result<Json<NewReading>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    // ---
    let Json(reading) = payload.map_err(|rejection| {
        debug!("rejected reading payload: {rejection}");
        ApiError::BadRequest("Missing required fields".to_string())
    })?;

    reading.validate().map_err(ApiError::Validation)?;

    let stored = store::insert(&pool, &reading)
        .await
        .map_err(|e| ApiError::from_sqlx(e, config.expose_internal_errors))?;

    info!(device = %stored.device.id, "stored sensor reading {}", stored.id);
    Ok((StatusCode::CREATED, Json(stored)))
}
