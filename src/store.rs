//! Time-series persistence for sensor readings.
//!
//! Thin async layer over the shared [`PgPool`]: one insert path and the
//! read queries backing the latest/history/stats endpoints. Range filtering,
//! sorting, pagination and aggregation are all pushed into SQL so large
//! histories never travel through the application layer.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{DeviceStats, NewReading, Reading};

// ---

const READING_COLUMNS: &str = "id, temperature, humidity, pressure, timestamp, \
     device_id, device_name, device_location, created_at, updated_at";

/// Largest accepted rolling window (100 years). Client-supplied window
/// sizes are clamped to this so the cutoff arithmetic stays inside
/// chrono's representable range instead of panicking on huge values.
pub const MAX_WINDOW_HOURS: i64 = 24 * 365 * 100;
pub const MAX_WINDOW_DAYS: i64 = 365 * 100;

/// Rolling window of `hours`, clamped to `0..=MAX_WINDOW_HOURS`.
pub fn hours_window(hours: i64) -> Duration {
    Duration::hours(hours.clamp(0, MAX_WINDOW_HOURS))
}

/// Rolling window of `days`, clamped to `0..=MAX_WINDOW_DAYS`.
pub fn days_window(days: i64) -> Duration {
    Duration::days(days.clamp(0, MAX_WINDOW_DAYS))
}

/// Row offset for a 1-indexed page; saturates instead of overflowing on
/// extreme page × page_size combinations.
fn page_offset(page: u32, page_size: u32) -> i64 {
    (page.max(1) as i64 - 1).saturating_mul(page_size as i64)
}

/// Persist one validated reading and return the stored row.
///
/// Callers must have run [`NewReading::validate`] first; this function does
/// not re-check ranges. Each insert is an independent single-row write, so
/// concurrent ingestion from multiple devices needs no coordination.
pub async fn insert(pool: &PgPool, reading: &NewReading) -> Result<Reading, sqlx::Error> {
    // ---
    let device = reading.device.with_defaults();
    let timestamp = reading.timestamp.unwrap_or_else(Utc::now);

    sqlx::query_as::<_, Reading>(&format!(
        r#"
        INSERT INTO readings
            (id, temperature, humidity, pressure, timestamp,
             device_id, device_name, device_location)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {READING_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(reading.temperature)
    .bind(reading.humidity)
    .bind(reading.pressure)
    .bind(timestamp)
    .bind(&device.id)
    .bind(&device.name)
    .bind(&device.location)
    .fetch_one(pool)
    .await
}

/// Most recent reading overall, or for one device.
///
/// `Ok(None)` means the store holds no matching reading; that is distinct
/// from a storage failure and maps to 404 at the API boundary.
pub async fn latest(pool: &PgPool, device_id: Option<&str>) -> Result<Option<Reading>, sqlx::Error> {
    // ---
    sqlx::query_as::<_, Reading>(&format!(
        r#"
        SELECT {READING_COLUMNS}
        FROM readings
        WHERE ($1::text IS NULL OR device_id = $1)
        ORDER BY timestamp DESC
        LIMIT 1
        "#
    ))
    .bind(device_id)
    .fetch_optional(pool)
    .await
}

/// One page of readings newer than `now - since`, sorted descending, plus
/// the total count of matching rows.
///
/// Pages are 1-indexed; requesting a page past the end yields an empty
/// slice, not an error.
pub async fn query_range(
    pool: &PgPool,
    since: Duration,
    device_id: Option<&str>,
    page: u32,
    page_size: u32,
) -> Result<(Vec<Reading>, i64), sqlx::Error> {
    // ---
    let cutoff = Utc::now() - since;
    let offset = page_offset(page, page_size);

    let data = sqlx::query_as::<_, Reading>(&format!(
        r#"
        SELECT {READING_COLUMNS}
        FROM readings
        WHERE timestamp >= $1 AND ($2::text IS NULL OR device_id = $2)
        ORDER BY timestamp DESC
        LIMIT $3 OFFSET $4
        "#
    ))
    .bind(cutoff)
    .bind(device_id)
    .bind(page_size as i64)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM readings
        WHERE timestamp >= $1 AND ($2::text IS NULL OR device_id = $2)
        "#,
    )
    .bind(cutoff)
    .bind(device_id)
    .fetch_one(pool)
    .await?;

    Ok((data, total))
}

/// Readings newer than `now - since` in ascending time order, for the
/// analytics layer (oldest first is what the regression expects).
pub async fn recent_series(
    pool: &PgPool,
    since: Duration,
    device_id: Option<&str>,
) -> Result<Vec<Reading>, sqlx::Error> {
    // ---
    let cutoff = Utc::now() - since;

    sqlx::query_as::<_, Reading>(&format!(
        r#"
        SELECT {READING_COLUMNS}
        FROM readings
        WHERE timestamp >= $1 AND ($2::text IS NULL OR device_id = $2)
        ORDER BY timestamp ASC
        "#
    ))
    .bind(cutoff)
    .bind(device_id)
    .fetch_all(pool)
    .await
}

/// Per-device aggregates over `now - since`, grouped by device id.
///
/// Display name and location carry the first-seen (earliest-timestamped)
/// value within each group, resolved in SQL via ordered `array_agg`.
pub async fn aggregate(
    pool: &PgPool,
    since: Duration,
    device_id: Option<&str>,
) -> Result<Vec<DeviceStats>, sqlx::Error> {
    // ---
    let cutoff = Utc::now() - since;

    sqlx::query_as::<_, DeviceStats>(
        r#"
        SELECT
            device_id,
            (array_agg(device_name ORDER BY timestamp ASC))[1]     AS device_name,
            (array_agg(device_location ORDER BY timestamp ASC))[1] AS device_location,
            AVG(temperature) AS avg_temperature,
            MIN(temperature) AS min_temperature,
            MAX(temperature) AS max_temperature,
            AVG(humidity)    AS avg_humidity,
            AVG(pressure)    AS avg_pressure,
            COUNT(*)         AS reading_count,
            MAX(timestamp)   AS last_reading
        FROM readings
        WHERE timestamp >= $1 AND ($2::text IS NULL OR device_id = $2)
        GROUP BY device_id
        ORDER BY device_id
        "#,
    )
    .bind(cutoff)
    .bind(device_id)
    .fetch_all(pool)
    .await
}

/// Number of pages needed to cover `total` rows: `ceil(total / page_size)`.
pub fn page_count(total: i64, page_size: u32) -> u32 {
    // ---
    if page_size == 0 || total <= 0 {
        return 0;
    }
    ((total + page_size as i64 - 1) / page_size as i64) as u32
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn page_count_is_ceiling_division() {
        // ---
        assert_eq!(page_count(15, 10), 2);
        assert_eq!(page_count(20, 10), 2);
        assert_eq!(page_count(21, 10), 3);
        assert_eq!(page_count(1, 100), 1);
        assert_eq!(page_count(0, 10), 0);
    }

    #[test]
    fn page_count_handles_degenerate_sizes() {
        // ---
        assert_eq!(page_count(10, 0), 0);
        assert_eq!(page_count(-1, 10), 0);
    }

    #[test]
    fn extreme_window_sizes_clamp_instead_of_panicking() {
        // ---
        // i64::MAX hours overflows chrono's TimeDelta without the clamp
        let widest = hours_window(i64::MAX);
        assert_eq!(widest, Duration::hours(MAX_WINDOW_HOURS));
        // The cutoff subtraction must also stay representable
        let _ = Utc::now() - widest;
        let _ = Utc::now() - days_window(i64::MAX);
        assert_eq!(days_window(i64::MAX), Duration::days(MAX_WINDOW_DAYS));
    }

    #[test]
    fn negative_window_sizes_clamp_to_zero() {
        // ---
        assert_eq!(hours_window(-24), Duration::zero());
        assert_eq!(days_window(i64::MIN), Duration::zero());
    }

    #[test]
    fn ordinary_window_sizes_pass_through() {
        // ---
        assert_eq!(hours_window(24), Duration::hours(24));
        assert_eq!(days_window(7), Duration::days(7));
    }

    #[test]
    fn page_offset_is_zero_indexed_and_saturates() {
        // ---
        assert_eq!(page_offset(1, 10), 0);
        assert_eq!(page_offset(2, 10), 10);
        assert_eq!(page_offset(0, 10), 0);
        // u32::MAX × u32::MAX exceeds i64; must saturate, not overflow
        assert_eq!(page_offset(u32::MAX, u32::MAX), i64::MAX);
    }
}
