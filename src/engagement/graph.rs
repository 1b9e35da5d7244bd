// Bookhive - Social Book Catalog
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! Engagement edge mutation and queries
//!
//! The three user↔book edge sets (favorite, read, reading) live in one
//! table per kind, keyed (user_id, book_id). Edge sets are idempotent:
//! inserting an existing edge and deleting an absent one are both no-ops.
//! Counts are always read from the live tables; there is no cached
//! counter to drift.

use crate::error::{CatalogError, Result};
use crate::storage::models::EngagementKind;
use crate::storage::queries;
use sqlx::SqlitePool;

/// Insert an engagement edge if absent
///
/// Fails with `BookNotFound` when the book id does not resolve. User
/// existence is enforced by the Users foreign key; a violation surfaces
/// as `RecordNotFound` rather than silently creating a phantom user.
pub async fn add_edge(
    pool: &SqlitePool,
    kind: EngagementKind,
    book_id: &str,
    user_id: &str,
) -> Result<()> {
    if !queries::book_exists(pool, book_id).await? {
        return Err(CatalogError::book_not_found(book_id));
    }

    let sql = format!(
        "INSERT OR IGNORE INTO {} (user_id, book_id) VALUES (?, ?)",
        kind.table()
    );
    sqlx::query(&sql)
        .bind(user_id)
        .bind(book_id)
        .execute(pool)
        .await
        .map_err(|e| user_fk_violation(e, user_id))?;

    tracing::debug!(%kind, book_id, user_id, "engagement edge added");

    Ok(())
}

/// Delete an engagement edge if present; absent edges are a no-op
pub async fn remove_edge(
    pool: &SqlitePool,
    kind: EngagementKind,
    book_id: &str,
    user_id: &str,
) -> Result<()> {
    let sql = format!(
        "DELETE FROM {} WHERE user_id = ? AND book_id = ?",
        kind.table()
    );
    sqlx::query(&sql)
        .bind(user_id)
        .bind(book_id)
        .execute(pool)
        .await?;

    tracing::debug!(%kind, book_id, user_id, "engagement edge removed");

    Ok(())
}

/// Count edges of one kind for a book, from the live edge set
pub async fn count_edges(pool: &SqlitePool, kind: EngagementKind, book_id: &str) -> Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM {} WHERE book_id = ?", kind.table());
    let count: i64 = sqlx::query_scalar(&sql)
        .bind(book_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Map a foreign-key violation on the user column to a lookup failure
fn user_fk_violation(err: sqlx::Error, user_id: &str) -> CatalogError {
    match &err {
        sqlx::Error::Database(db)
            if matches!(db.kind(), sqlx::error::ErrorKind::ForeignKeyViolation) =>
        {
            CatalogError::not_found(format!("user {}", user_id))
        }
        _ => err.into(),
    }
}
