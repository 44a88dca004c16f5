// src/routes/health.rs
//! Liveness endpoint for the weatherdash backend.
//!
//! Defines the `/health` route used by container orchestrators and CI to
//! check that the service is up and answering HTTP. It is a sibling module
//! in the `routes` directory and follows the Explicit Module Boundary
//! Pattern (EMBP): the handler stays internal to this file and only the
//! subrouter is exported to the gateway (`mod.rs`), which merges it into
//! the top-level API router.

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// JSON response body for the `/health` endpoint.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Handle `GET /health`.
///
/// Returns a static JSON object indicating the API is reachable. This
/// endpoint deliberately does not touch the database, so it stays green
/// while the store is reconnecting.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Create a subrouter containing the `/health` route.
///
/// Generic over the application state so it merges cleanly with the
/// gateway router regardless of the state type (here `(PgPool, Config)`).
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
