//! Database transaction utilities
//!
//! Inserts run inside a transaction so that a failed statement or commit
//! leaves no partial row behind.

use sqlx::{PgPool, Postgres, Transaction};
use std::future::Future;
use std::pin::Pin;
use vupi_core::AppError;

/// Execute a closure within a database transaction
///
/// Begins a transaction, runs the closure and commits if it succeeds. On any
/// error the transaction is rolled back and the error is returned as
/// `AppError::Persistence`.
///
/// # Example
///
/// ```ignore
/// use vupi_db::with_transaction;
///
/// async fn example(pool: &sqlx::PgPool) -> Result<(), vupi_core::AppError> {
///     with_transaction(pool, |tx| {
///         Box::pin(async move {
///             sqlx::query("INSERT INTO ...").execute(&mut **tx).await?;
///             Ok(())
///         })
///     })
///     .await
/// }
/// ```
pub async fn with_transaction<F, R>(pool: &PgPool, f: F) -> Result<R, AppError>
where
    F: for<'a> FnOnce(
        &'a mut Transaction<'_, Postgres>,
    ) -> Pin<Box<dyn Future<Output = Result<R, sqlx::Error>> + Send + 'a>>,
{
    let mut tx = pool.begin().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to begin transaction");
        AppError::Persistence(e)
    })?;

    match f(&mut tx).await {
        Ok(result) => {
            tx.commit().await.map_err(|e| {
                tracing::error!(error = %e, "Failed to commit transaction");
                AppError::Persistence(e)
            })?;
            Ok(result)
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "Failed to roll back transaction");
            }
            Err(AppError::Persistence(e))
        }
    }
}
