//! Entry CRUD against PostgreSQL. Every call runs on the caller's connection, which is
//! the request transaction; nothing here commits on its own.

use crate::error::AppError;
use crate::service::validation::EntryDraft;
use crate::sql::{ENTRIES_REACHABLE, INSERT_ENTRY, LIST_ENTRIES, SELECT_ENTRY, UPDATE_ENTRY};
use chrono::{NaiveDateTime, SubsecRound, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgConnection};

/// A persisted journal entry. `text` is the raw markdown source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, FromRow)]
pub struct Entry {
    pub id: i32,
    pub title: String,
    pub text: String,
    /// UTC, server-assigned.
    pub created: NaiveDateTime,
}

pub struct EntryStore;

impl EntryStore {
    /// All entries, newest first. Ties on `created` fall back to the higher id.
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<Entry>, AppError> {
        tracing::debug!(sql = %LIST_ENTRIES, "query");
        let rows = sqlx::query_as::<_, Entry>(LIST_ENTRIES)
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows)
    }

    /// One entry by id; `NotFound` when no row matches.
    pub async fn get(conn: &mut PgConnection, id: i32) -> Result<Entry, AppError> {
        tracing::debug!(sql = %SELECT_ENTRY, id, "query");
        sqlx::query_as::<_, Entry>(SELECT_ENTRY)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Insert a new entry stamped with the current UTC time. Returns the stored row.
    pub async fn create(conn: &mut PgConnection, draft: &EntryDraft) -> Result<Entry, AppError> {
        tracing::debug!(sql = %INSERT_ENTRY, "query");
        let entry = sqlx::query_as::<_, Entry>(INSERT_ENTRY)
            .bind(draft.title())
            .bind(draft.text())
            .bind(now())
            .fetch_one(&mut *conn)
            .await?;
        tracing::info!(id = entry.id, "entry created");
        Ok(entry)
    }

    /// Succeeds when the `entries` table can be read on this connection.
    pub async fn reachable(conn: &mut PgConnection) -> Result<(), AppError> {
        sqlx::query(ENTRIES_REACHABLE)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(())
    }

    /// Overwrite title and text and reset `created` to now. The id never changes.
    pub async fn update(
        conn: &mut PgConnection,
        id: i32,
        draft: &EntryDraft,
    ) -> Result<Entry, AppError> {
        tracing::debug!(sql = %UPDATE_ENTRY, id, "query");
        let entry = sqlx::query_as::<_, Entry>(UPDATE_ENTRY)
            .bind(draft.title())
            .bind(draft.text())
            .bind(now())
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(id, "entry updated");
        Ok(entry)
    }
}

/// Postgres `TIMESTAMP` keeps microseconds; truncate so the returned row matches what a later read sees.
fn now() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(6)
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("entry {}", id))
}
