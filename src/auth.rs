//! Shared-secret access guard for state-changing routes.
//!
//! Only write routes are layered with this middleware; reads never pass
//! through it, so they require no credential in any mode. The expected key
//! and the dev-mode bypass come from the injected [`Config`] rather than
//! ambient process state, which lets tests exercise the check with a
//! hand-built config.

use axum::{extract::Request, extract::State, middleware::Next, response::Response};
use sqlx::PgPool;

use crate::{error::ApiError, Config};

// ---

pub const API_KEY_HEADER: &str = "X-API-Key";

/// Route layer applied to `POST /api/data`.
pub async fn require_api_key(
    State((_, config)): State<(PgPool, Config)>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // ---
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    verify(provided, &config)?;
    Ok(next.run(request).await)
}

/// Check a caller-supplied key against the configured secret.
///
/// Missing key and mismatched key are distinct failures (401 vs 403). The
/// dev-mode flag skips the check entirely for writes.
fn verify(provided: Option<&str>, config: &Config) -> Result<(), ApiError> {
    // ---
    if config.allow_unauthenticated_writes {
        return Ok(());
    }

    match provided {
        None => Err(ApiError::MissingApiKey),
        Some(key) if key != config.api_key => Err(ApiError::InvalidApiKey),
        Some(_) => Ok(()),
    }
}
