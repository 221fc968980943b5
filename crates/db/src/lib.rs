//! PostgreSQL access for the reporting service: connection configuration,
//! pool construction, schema migrations and the report queries.

use sqlx::postgres::PgPoolOptions;

pub mod config;
pub mod models;
pub mod query;
pub mod repositories;

pub use config::{DbConfig, DbConfigError};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from the given configuration.
///
/// Connections are acquired per statement and returned to the pool when the
/// query finishes, whether it succeeded or failed. Connectivity and
/// authentication failures are returned to the caller unchanged.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    let options = config.connect_options()?;
    tracing::debug!(
        host = %config.host,
        port = config.port,
        database = %config.database,
        max_connections = config.max_connections,
        statement_timeout_ms = ?config.statement_timeout_ms,
        "Connecting to database",
    );
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
}

/// Run a trivial query to verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded schema migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
