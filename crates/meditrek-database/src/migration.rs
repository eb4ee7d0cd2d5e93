//! Database migration runner.

use sqlx::PgPool;
use tracing::info;

use meditrek_core::error::{AppError, ErrorKind};

/// Run all pending database migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!("Running database migrations...");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to run migrations: {e}"),
                e,
            )
        })?;

    info!("Database migrations completed successfully");
    Ok(())
}

/// Delete every row from the application tables.
pub async fn truncate_all(pool: &PgPool) -> Result<u64, AppError> {
    let result = sqlx::query("TRUNCATE TABLE alerts, diagnostic_tests, users")
        .execute(pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, format!("Failed to truncate tables: {e}"), e)
        })?;

    info!("Application tables truncated");
    Ok(result.rows_affected())
}
