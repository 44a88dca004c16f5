//! Data models for sensor readings.
//!
//! `NewReading` is the inbound ingestion payload; `Reading` is the stored,
//! immutable row returned by every query. Range validation lives here as a
//! pure function so it can be unit-tested without a database; it is a strict
//! precondition of `store::insert`, so nothing is ever partially persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};
use uuid::Uuid;

use crate::error::FieldError;

// ---

/// Physically plausible bounds for each sensor channel.
pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f64> = -40.0..=120.0;
pub const HUMIDITY_RANGE: std::ops::RangeInclusive<f64> = 0.0..=100.0;
pub const PRESSURE_RANGE: std::ops::RangeInclusive<f64> = 300.0..=1100.0;

pub const DEFAULT_DEVICE_NAME: &str = "Raspberry Pi SenseHat";
pub const DEFAULT_DEVICE_LOCATION: &str = "Unknown";

/// Device block as it appears in the ingestion payload; name and location
/// are optional and defaulted on insert.
#[derive(Debug, Clone, Deserialize)]
pub struct DevicePayload {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl DevicePayload {
    pub fn with_defaults(&self) -> DeviceInfo {
        // ---
        DeviceInfo {
            id: self.id.clone(),
            name: self
                .name
                .clone()
                .unwrap_or_else(|| DEFAULT_DEVICE_NAME.to_string()),
            location: self
                .location
                .clone()
                .unwrap_or_else(|| DEFAULT_DEVICE_LOCATION.to_string()),
        }
    }
}

/// Device identity as stored alongside each reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub id: String,
    pub name: String,
    pub location: String,
}

/// Inbound sensor sample submitted by a device via `POST /api/data`.
#[derive(Debug, Deserialize)]
pub struct NewReading {
    // ---
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub device: DevicePayload,
    /// Sample time; defaults to ingestion time when omitted.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl NewReading {
    /// Check every field against its plausible physical range.
    ///
    /// Collects all violations rather than stopping at the first so the
    /// client sees the complete list in the error `details`.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        // ---
        let mut errors = Vec::new();

        if !TEMPERATURE_RANGE.contains(&self.temperature) {
            errors.push(FieldError::new(
                "temperature",
                format!(
                    "reading of {} °C is outside the reasonable range {} to {}",
                    self.temperature,
                    TEMPERATURE_RANGE.start(),
                    TEMPERATURE_RANGE.end()
                ),
            ));
        }

        if !HUMIDITY_RANGE.contains(&self.humidity) {
            errors.push(FieldError::new(
                "humidity",
                format!(
                    "reading of {} % is outside the reasonable range {} to {}",
                    self.humidity,
                    HUMIDITY_RANGE.start(),
                    HUMIDITY_RANGE.end()
                ),
            ));
        }

        if !PRESSURE_RANGE.contains(&self.pressure) {
            errors.push(FieldError::new(
                "pressure",
                format!(
                    "reading of {} hPa is outside the reasonable range {} to {}",
                    self.pressure,
                    PRESSURE_RANGE.start(),
                    PRESSURE_RANGE.end()
                ),
            ));
        }

        if self.device.id.trim().is_empty() {
            errors.push(FieldError::new("device.id", "must not be empty"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Stored sensor reading as served to clients. Immutable after creation;
/// there is no update or delete path anywhere in this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    // ---
    pub id: Uuid,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub timestamp: DateTime<Utc>,
    pub device: DeviceInfo,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// The device block is flattened into device_* columns in Postgres, so the
// row mapping is spelled out by hand rather than derived.
impl FromRow<'_, PgRow> for Reading {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        // ---
        Ok(Reading {
            id: row.try_get("id")?,
            temperature: row.try_get("temperature")?,
            humidity: row.try_get("humidity")?,
            pressure: row.try_get("pressure")?,
            timestamp: row.try_get("timestamp")?,
            device: DeviceInfo {
                id: row.try_get("device_id")?,
                name: row.try_get("device_name")?,
                location: row.try_get("device_location")?,
            },
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Per-device aggregate produced by `GET /api/stats`.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStats {
    // ---
    pub device_id: String,
    pub device_name: String,
    #[serde(rename = "location")]
    pub device_location: String,
    pub avg_temperature: f64,
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub avg_humidity: f64,
    pub avg_pressure: f64,
    pub reading_count: i64,
    pub last_reading: DateTime<Utc>,
}

/// Envelope for `GET /api/data/history`.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub data: Vec<Reading>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Pagination {
    pub total: i64,
    pub page: u32,
    pub pages: u32,
}
