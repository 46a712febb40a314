//! Request transaction scope.
//!
//! One transaction per request: [`TransactionScope::run`] begins it on a pooled connection,
//! hands the connection to the operation, then commits on `Ok` or rolls back on `Err`.
//! If the operation panics or the request future is dropped, sqlx rolls the transaction
//! back when it is dropped. The connection goes back to the pool on every path.

use crate::error::AppError;
use futures::future::BoxFuture;
use sqlx::{PgConnection, PgPool};

/// Terminal state of a request transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Committed,
    RolledBack,
}

#[derive(Clone)]
pub struct TransactionScope {
    pool: PgPool,
}

impl TransactionScope {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run `op` inside a fresh transaction.
    ///
    /// ```ignore
    /// let entry = scope
    ///     .run(move |conn| Box::pin(async move { EntryStore::create(conn, &draft).await }))
    ///     .await?;
    /// ```
    pub async fn run<T, F>(&self, op: F) -> Result<T, AppError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, AppError>> + Send,
    {
        let mut tx = self.pool.begin().await?;
        let result = op(&mut *tx).await;
        let outcome = match &result {
            Ok(_) => {
                tx.commit().await?;
                Outcome::Committed
            }
            Err(err) => {
                tracing::debug!(error = %err, "rolling back request transaction");
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "rollback failed");
                }
                Outcome::RolledBack
            }
        };
        tracing::debug!(?outcome, "request transaction closed");
        result
    }
}
