//! API error taxonomy for the `weatherdash-backend` service.
//!
//! Every handler returns `Result<_, ApiError>`; the [`IntoResponse`] impl
//! renders the uniform envelope `{error, message, details?}` used by the
//! dashboard client. Storage failures are logged here with their full cause
//! and surfaced to callers with the internal text suppressed unless the
//! deployment opts into `EXPOSE_INTERNAL_ERRORS`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

// ---

/// One field-level validation failure, e.g. an out-of-range temperature.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Error taxonomy for the HTTP API.
///
/// Analyzer "insufficient data" outcomes are deliberately absent: they are
/// valid results carrying an `unknown` sentinel, not errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request body (missing/invalid fields), caught before
    /// range validation.
    #[error("{0}")]
    BadRequest(String),

    /// One or more reading fields failed range validation.
    #[error("sensor reading failed validation")]
    Validation(Vec<FieldError>),

    /// Write request arrived without an `X-API-Key` header.
    #[error("no API key provided")]
    MissingApiKey,

    /// Write request carried a key that does not match the configured secret.
    #[error("invalid API key")]
    InvalidApiKey,

    /// No reading matched the query.
    #[error("{0}")]
    NotFound(String),

    /// Unique-constraint violation from the store.
    #[error("duplicate entry found")]
    Conflict,

    /// Storage connectivity or infrastructure failure; callers may retry.
    #[error("storage failure")]
    Storage { detail: Option<String> },
}

impl ApiError {
    /// Translate a store-layer error into the API taxonomy.
    ///
    /// Unique-key violations (Postgres error code 23505) map to `Conflict`;
    /// everything else is a retryable `Storage` failure. The raw error text
    /// is kept in the response only when `expose_internal` is set.
    pub fn from_sqlx(err: sqlx::Error, expose_internal: bool) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.code().as_deref() == Some("23505") {
                return ApiError::Conflict;
            }
        }
        tracing::error!("storage error: {err}");
        ApiError::Storage {
            detail: expose_internal.then(|| err.to_string()),
        }
    }
}

// ---

/// JSON envelope rendered for every error response.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message, details) = match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, "Bad Request", message, None)
            }
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "Validation Error",
                "Sensor reading failed validation".to_string(),
                Some(
                    errors
                        .iter()
                        .map(|e| format!("{}: {}", e.field, e.message))
                        .collect(),
                ),
            ),
            ApiError::MissingApiKey => (
                StatusCode::UNAUTHORIZED,
                "Authentication failed",
                "No API key provided".to_string(),
                None,
            ),
            ApiError::InvalidApiKey => (
                StatusCode::FORBIDDEN,
                "Authentication failed",
                "Invalid API key".to_string(),
                None,
            ),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "Not Found", message, None),
            ApiError::Conflict => (
                StatusCode::CONFLICT,
                "Conflict",
                "Duplicate entry found".to_string(),
                None,
            ),
            ApiError::Storage { detail } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                detail.unwrap_or_else(|| "Something went wrong".to_string()),
                None,
            ),
        };

        (
            status,
            Json(ErrorBody {
                error,
                message,
                details,
            }),
        )
            .into_response()
    }
}
