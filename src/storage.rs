//! PostgreSQL storage adapter: owns the connection pool and the database/schema bootstrap.

use crate::config::DatabaseConfig;
use crate::error::AppError;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Storage {
    pool: PgPool,
}

impl Storage {
    /// Open the pool and verify one connection can be established.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let opts = config.connect_options()?;
        let database = config.database_name()?;
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(opts)
            .await?;
        tracing::info!(
            database = %database,
            schema = config.schema.as_deref().unwrap_or("public"),
            "storage connected"
        );
        Ok(Self { pool })
    }

    /// Pool that connects on first use. Nothing touches the network until a query runs.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, AppError> {
        let opts = config.connect_options()?;
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_lazy_with(opts);
        Ok(Self { pool })
    }

    /// Query-execution handle.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to be returned.
    pub async fn disconnect(self) {
        self.pool.close().await;
        tracing::info!("storage disconnected");
    }
}

/// Ensure the configured database exists; create it if not. Connects to the
/// `postgres` maintenance database to run CREATE DATABASE. Call before [`Storage::connect`].
pub async fn ensure_database_exists(config: &DatabaseConfig) -> Result<(), AppError> {
    let db_name = config.database_name()?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let admin: PgConnectOptions = config.connect_options()?.database("postgres");
    let mut conn = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "database created");
    }
    Ok(())
}

/// Create the configured schema when one is set. No-op for the default search path.
pub async fn ensure_schema(storage: &Storage, config: &DatabaseConfig) -> Result<(), AppError> {
    if let Some(schema) = &config.schema {
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(schema)))
            .execute(storage.pool())
            .await?;
    }
    Ok(())
}

pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
