//! PostgreSQL connection pool management.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use mingle_core::config::{DatabaseConfig, mask_url};
use mingle_core::error::{AppError, ErrorKind};

/// Wrapper around the sqlx PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Create a pool that connects on first use.
    ///
    /// Lets commands that never query the database run without it.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, AppError> {
        info!(
            url = %mask_url(&config.url),
            max_connections = config.max_connections,
            "Configuring PostgreSQL pool"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect_lazy(&config.url)
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Invalid database configuration: {e}"),
                    e,
                )
            })?;

        Ok(Self { pool })
    }

    /// Return the underlying sqlx pool (consuming self).
    pub fn into_pool(self) -> PgPool {
        self.pool
    }
}
