//! Embedded SQL migrations.
//!
//! The `sqlx::migrate!` macro embeds every file under `migrations/` at
//! compile time; applied versions are tracked in `_sqlx_migrations`.
//! Never modify an existing migration, always add a new one.

use sqlx::SqlitePool;
use tracing::info;

use stockwise_core::{DomainError, DomainResult};

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Run all pending migrations. Idempotent.
pub async fn run_migrations(pool: &SqlitePool) -> DomainResult<()> {
    info!("running database migrations");
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| DomainError::backend(format!("migration failed: {e}")))?;
    Ok(())
}
