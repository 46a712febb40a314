//! Apply the journal schema to the database. Idempotent; safe to run on every start.

use crate::error::AppError;
use crate::sql::{ENTRIES_CREATED_INDEX, ENTRIES_SCHEMA};
use sqlx::PgPool;

/// Create the `entries` table and its ordering index if they do not exist.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    for ddl in [ENTRIES_SCHEMA, ENTRIES_CREATED_INDEX] {
        tracing::debug!(sql = %ddl, "migration");
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::info!("entries schema ready");
    Ok(())
}
