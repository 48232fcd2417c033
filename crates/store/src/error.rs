//! Mapping sqlx failures into the domain taxonomy, plus the per-call
//! deadline every repository method runs under.

use std::future::Future;
use std::time::Duration;

use stockwise_core::{DomainError, DomainResult};

/// Upper bound for any single store call, mirroring a per-request database
/// budget. A timed-out call fails `Backend` and its transaction rolls back.
pub(crate) const CALL_DEADLINE: Duration = Duration::from_secs(5);

pub(crate) async fn bounded<T>(fut: impl Future<Output = DomainResult<T>>) -> DomainResult<T> {
    match tokio::time::timeout(CALL_DEADLINE, fut).await {
        Ok(result) => result,
        Err(_) => Err(DomainError::backend("database call exceeded deadline")),
    }
}

/// Translate a sqlx error into the domain taxonomy.
///
/// SQLite reports constraint violations only through the message text:
/// `UNIQUE constraint failed: <table>.<column>` and
/// `FOREIGN KEY constraint failed`.
pub(crate) fn map_sqlx(err: sqlx::Error) -> DomainError {
    match err {
        sqlx::Error::RowNotFound => DomainError::not_found("row"),
        sqlx::Error::Database(db_err) => {
            let msg = db_err.message();
            if msg.contains("UNIQUE constraint failed") {
                let field = msg
                    .split("UNIQUE constraint failed: ")
                    .nth(1)
                    .unwrap_or("unknown");
                DomainError::conflict(format!("duplicate value for {field}"))
            } else if msg.contains("FOREIGN KEY constraint failed") {
                DomainError::not_found("referenced row")
            } else {
                DomainError::backend(msg.to_owned())
            }
        }
        other => DomainError::backend(other.to_string()),
    }
}

/// Delete-path variant of [`map_sqlx`]. A FOREIGN KEY failure on a delete
/// means the row is still referenced by other rows, which is a state
/// conflict rather than a missing referent.
pub(crate) fn map_sqlx_delete(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err)
            if db_err.message().contains("FOREIGN KEY constraint failed") =>
        {
            DomainError::conflict("row is still referenced")
        }
        _ => map_sqlx(err),
    }
}
