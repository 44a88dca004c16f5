//! Database schema management for `weatherdash-backend`.
//!
//! Ensures the readings table and its indexes exist before serving requests.
//! Applied once on startup from `main.rs` (EMBP: single gateway call).

use anyhow::Result;
use sqlx::PgPool;

// ---

/// Create or update the database schema (idempotent).
///
/// Creates the `readings` table holding one row per immutable sensor sample,
/// with the device block flattened into `device_*` columns. Safe to call on
/// every startup; no-op if objects already exist.
///
/// Errors are propagated if any SQL execution fails.
pub async fn create_schema(pool: &PgPool) -> Result<()> {
    // ---
    let mut tx = pool.begin().await?;

    // Append-only table; no UPDATE or DELETE is issued anywhere in the crate.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS readings (
            id              UUID PRIMARY KEY,
            temperature     DOUBLE PRECISION NOT NULL,
            humidity        DOUBLE PRECISION NOT NULL,
            pressure        DOUBLE PRECISION NOT NULL,
            timestamp       TIMESTAMPTZ      NOT NULL,
            device_id       TEXT             NOT NULL,
            device_name     TEXT             NOT NULL,
            device_location TEXT             NOT NULL,
            created_at      TIMESTAMPTZ      NOT NULL DEFAULT now(),
            updated_at      TIMESTAMPTZ      NOT NULL DEFAULT now()
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // Descending timestamp index for latest/range queries
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_readings_timestamp
            ON readings (timestamp DESC);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_readings_device_id
            ON readings (device_id);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}
