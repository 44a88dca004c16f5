use axum::Router;
use sqlx::PgPool;

use crate::{error::ApiError, Config};

mod health;
mod insights;
mod readings;
mod stats;

// ---

pub fn router(pool: PgPool, config: Config) -> Router {
    // ---
    Router::new()
        .merge(readings::router(pool.clone(), config.clone()))
        .merge(stats::router())
        .merge(insights::router())
        .merge(health::router())
        .fallback(not_found)
        .with_state((pool, config))
}

/// Unknown paths get the same error envelope as every other failure.
async fn not_found() -> ApiError {
    // ---
    ApiError::NotFound("The requested resource was not found".to_string())
}
