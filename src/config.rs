//! Configuration loader for the `weatherdash-backend` service.
//!
//! This module centralizes all runtime configuration values and their
//! defaults, loading from environment variables (with optional `.env` file
//! support provided by the caller). Consolidating configuration here keeps
//! `env::var` calls out of the rest of the codebase; in particular the API
//! key and the development-mode flags are injected into the access guard as
//! plain values, so tests can construct a `Config` directly instead of
//! mutating process environment.

use std::env;

use anyhow::{anyhow, Result};

/// Parse an optional integer environment variable with a default value.
macro_rules! parse_env_num {
    ($var_name:expr, $ty:ty, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Parse an optional boolean environment variable (1/true/yes).
macro_rules! parse_env_flag {
    ($var_name:expr) => {
        matches!(
            env::var($var_name).ok().as_deref(),
            Some("1") | Some("true") | Some("yes")
        )
    };
}

/// Parse a required string environment variable.
macro_rules! require_env {
    ($var_name:expr) => {
        env::var($var_name)
            .map_err(|_| anyhow!("{} must be set in .env or environment", $var_name))?
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent
/// configuration snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// PostgreSQL connection string.
    pub db_url: String,

    /// Maximum number of database connections in the pool.
    pub db_pool_max: u32,

    /// TCP port the HTTP server binds to.
    pub port: u16,

    /// Shared secret required on write requests (`X-API-Key` header).
    pub api_key: String,

    /// Development convenience: accept writes without an API key.
    /// Reads never require a key regardless of this flag.
    pub allow_unauthenticated_writes: bool,

    /// Development convenience: include internal error text in 500 bodies.
    pub expose_internal_errors: bool,
}

/// Load configuration from environment variables with defaults.
///
/// Required:
/// - `DATABASE_URL` – PostgreSQL connection string
/// - `API_KEY` – shared secret for write requests
///
/// Optional:
/// - `DB_POOL_MAX` – max DB connections (default: 5)
/// - `PORT` – HTTP listen port (default: 3000)
/// - `ALLOW_UNAUTHENTICATED_WRITES` – dev-mode write bypass (default: off)
/// - `EXPOSE_INTERNAL_ERRORS` – dev-mode error detail (default: off)
///
/// Returns an error if any required variable is missing or invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let db_url = require_env!("DATABASE_URL");
    let api_key = require_env!("API_KEY");
    let db_pool_max = parse_env_num!("DB_POOL_MAX", u32, 5);
    let port = parse_env_num!("PORT", u16, 3000);
    let allow_unauthenticated_writes = parse_env_flag!("ALLOW_UNAUTHENTICATED_WRITES");
    let expose_internal_errors = parse_env_flag!("EXPOSE_INTERNAL_ERRORS");

    Ok(Config {
        db_url,
        db_pool_max,
        port,
        api_key,
        allow_unauthenticated_writes,
        expose_internal_errors,
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    ///
    /// Masks the database password and the API key while showing all other
    /// configuration values that were loaded.
    pub fn log_config(&self) {
        // ---
        // Mask the password in the database URL for security
        let masked_db_url = if let Some(at_pos) = self.db_url.rfind('@') {
            if let Some(colon_pos) = self.db_url[..at_pos].rfind(':') {
                format!(
                    "{}:****{}",
                    &self.db_url[..colon_pos],
                    &self.db_url[at_pos..]
                )
            } else {
                self.db_url.clone()
            }
        } else {
            self.db_url.clone()
        };

        tracing::info!("Configuration loaded:");
        tracing::info!("  DATABASE_URL                 : {}", masked_db_url);
        tracing::info!("  DB_POOL_MAX                  : {}", self.db_pool_max);
        tracing::info!("  PORT                         : {}", self.port);
        tracing::info!("  API_KEY                      : ****");
        tracing::info!(
            "  ALLOW_UNAUTHENTICATED_WRITES : {}",
            self.allow_unauthenticated_writes
        );
        tracing::info!(
            "  EXPOSE_INTERNAL_ERRORS       : {}",
            self.expose_internal_errors
        );
    }
}

#[cfg(test)]
pub(crate) fn test_config(api_key: &str) -> Config {
    // ---
    Config {
        db_url: "postgres://localhost/test".to_string(),
        db_pool_max: 1,
        port: 0,
        api_key: api_key.to_string(),
        allow_unauthenticated_writes: false,
        expose_internal_errors: true,
    }
}
