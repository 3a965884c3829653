use std::time::Duration;

use folio_core::AppError;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::api_config::DatabaseConfig;

static MIGRATOR: Migrator = sqlx::migrate!("../../crates/infrastructure/migrations");

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens the document store pool and brings its schema up to date.
pub async fn connect_and_migrate(config: &DatabaseConfig) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(config.url.as_str())
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to connect to document store: {error}"))
        })?;

    MIGRATOR.run(&pool).await.map_err(|error| {
        AppError::Internal(format!("failed to migrate document store schema: {error}"))
    })?;

    info!(
        max_connections = config.max_connections,
        migrations = MIGRATOR.iter().count(),
        "document store ready"
    );

    Ok(pool)
}
