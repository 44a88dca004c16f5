//! Derived-insight endpoints over recent sensor data.
//!
//! EMBP sibling module exposing the analytics layer:
//! - `GET  /api/insights`             – trend, pressure and humidity insights
//!   plus anomalies over a rolling window
//! - `POST /api/insights/correlation` – Pearson agreement between stored
//!   series and an externally supplied reference series
//!
//! Each analysis runs independently over the same in-memory series;
//! analyses short on data render their explicit "unknown" sentinel rather
//! than failing the request. Nothing computed here is ever persisted.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::debug;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::{
    analytics::{
        self, Anomaly, CorrelationResult, HumidityInsight, PressureInsight, TrendResult,
    },
    error::ApiError,
    store, Config,
};

// ---

const DEFAULT_INSIGHT_HOURS: i64 = 24;

pub fn router() -> Router<(PgPool, Config)> {
    // ---
    Router::new()
        .route("/api/insights", get(get_insights))
        .route("/api/insights/correlation", post(post_correlation))
}

#[derive(Debug, Deserialize)]
struct InsightsQuery {
    hours: Option<i64>,
    #[serde(rename = "deviceId")]
    device_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct InsightsResponse {
    temperature: TrendResult,
    pressure: PressureInsight,
    humidity: HumidityInsight,
    anomalies: Vec<Anomaly>,
}

/// Handle `GET /api/insights`.
async fn get_insights(
    Query(params): Query<InsightsQuery>,
    State((pool, config)): State<(PgPool, Config)>,
) -> Result<Json<InsightsResponse>, ApiError> {
    // ---
    let hours = params.hours.unwrap_or(DEFAULT_INSIGHT_HOURS);

    let readings = store::recent_series(
        &pool,
        store::hours_window(hours),
        params.device_id.as_deref(),
    )
    .await
    .map_err(|e| ApiError::from_sqlx(e, config.expose_internal_errors))?;

    let temperatures: Vec<f64> = readings.iter().map(|r| r.temperature).collect();
    let pressures: Vec<f64> = readings.iter().map(|r| r.pressure).collect();
    let humidities: Vec<f64> = readings.iter().map(|r| r.humidity).collect();

    Ok(Json(InsightsResponse {
        temperature: analytics::analyze_temperature_trend(&temperatures),
        pressure: analytics::analyze_pressure(&pressures),
        humidity: analytics::analyze_humidity(&humidities),
        anomalies: analytics::detect_anomalies(&readings),
    }))
}

/// Reference series supplied by the dashboard, e.g. forecast values from
/// the external weather service. Numeric coercion only; no further schema
/// validation is applied.
#[derive(Debug, Deserialize)]
struct CorrelationRequest {
    hours: Option<i64>,
    #[serde(rename = "deviceId")]
    device_id: Option<String>,
    temperature: Option<Vec<f64>>,
    humidity: Option<Vec<f64>>,
}

#[derive(Debug, Serialize)]
struct CorrelationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<CorrelationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    humidity: Option<CorrelationResult>,
}

/// Handle `POST /api/insights/correlation`.
///
/// Read-only computation, so it sits outside the write guard despite the
/// POST verb (the body is the reference series, not state).
async fn post_correlation(
    State((pool, config)): State<(PgPool, Config)>,
    payload: Result<Json<CorrelationRequest>, JsonRejection>,
) -> Result<Json<CorrelationResponse>, ApiError> {
    // ---
    let Json(request) = payload.map_err(|rejection| {
        debug!("rejected correlation payload: {rejection}");
        ApiError::BadRequest("Invalid correlation payload".to_string())
    })?;

    let hours = request.hours.unwrap_or(DEFAULT_INSIGHT_HOURS);

    let readings = store::recent_series(
        &pool,
        store::hours_window(hours),
        request.device_id.as_deref(),
    )
    .await
    .map_err(|e| ApiError::from_sqlx(e, config.expose_internal_errors))?;

    let temperature = request.temperature.as_deref().map(|external| {
        let local: Vec<f64> = readings.iter().map(|r| r.temperature).collect();
        analytics::correlate(&local, external, "temperature")
    });

    let humidity = request.humidity.as_deref().map(|external| {
        let local: Vec<f64> = readings.iter().map(|r| r.humidity).collect();
        analytics::correlate(&local, external, "humidity")
    });

    Ok(Json(CorrelationResponse {
        temperature,
        humidity,
    }))
}
