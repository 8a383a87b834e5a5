//! Database connection pool management.

use async_trait::async_trait;
use shaku::Component;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;
use sunlog_config::DatabaseConfig;
use sunlog_core::{Interface, SunlogError, SunlogResult};
use tracing::{info, warn};

/// Interface for database pool operations.
#[async_trait]
pub trait DatabasePoolInterface: Interface + Send + Sync {
    /// Returns the underlying MySQL pool, or a configuration error when the
    /// component was built without one.
    fn try_pool(&self) -> SunlogResult<&MySqlPool>;

    /// Checks if the database connection is healthy.
    async fn health_check(&self) -> SunlogResult<()>;

    /// Runs database migrations.
    async fn run_migrations(&self) -> SunlogResult<()>;

    /// Closes the database pool.
    async fn close(&self);
}

/// Database pool wrapper.
///
/// The pool is optional so the component has buildable defaults; the DI
/// module always provides a connected pool at startup.
#[derive(Component)]
#[shaku(interface = DatabasePoolInterface)]
pub struct DatabasePool {
    pool: Option<MySqlPool>,
}

impl DatabasePool {
    /// Creates a new database pool from configuration.
    pub async fn connect(config: &DatabaseConfig) -> SunlogResult<Self> {
        info!("Connecting to MySQL database...");

        let pool = MySqlPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_secs)))
            .connect(&config.url)
            .await
            .map_err(|e| {
                warn!("Failed to connect to database: {}", e);
                SunlogError::Database(format!("Failed to connect: {}", e))
            })?;

        info!("MySQL connection pool established");
        Ok(Self { pool: Some(pool) })
    }

    /// Wraps an existing pool.
    #[must_use]
    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool: Some(pool) }
    }

    /// Returns the underlying pool, if configured.
    #[must_use]
    pub fn inner(&self) -> Option<&MySqlPool> {
        self.pool.as_ref()
    }
}

#[async_trait]
impl DatabasePoolInterface for DatabasePool {
    fn try_pool(&self) -> SunlogResult<&MySqlPool> {
        self.pool.as_ref().ok_or_else(|| {
            SunlogError::Configuration("database pool is not configured".to_string())
        })
    }

    async fn health_check(&self) -> SunlogResult<()> {
        let pool = self.try_pool()?;
        sqlx::query("SELECT 1")
            .execute(pool)
            .await
            .map_err(|e| SunlogError::Database(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    async fn run_migrations(&self) -> SunlogResult<()> {
        let pool = self.try_pool()?;
        info!("Running database migrations...");
        sqlx::migrate!("../../migrations")
            .run(pool)
            .await
            .map_err(|e| SunlogError::Database(format!("Migration failed: {}", e)))?;
        info!("Database migrations complete");
        Ok(())
    }

    async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
