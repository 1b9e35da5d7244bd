// Bookhive - Social Book Catalog
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Per-book engagement signal aggregation
//!
//! Signals are computed from the live edge tables on every call; nothing
//! is memoized, so a signal tuple always reflects the store state at call
//! time.

use crate::error::{CatalogError, Result};
use crate::storage::models::Book;
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

/// The signal tuple the trending ranker consumes
#[derive(Debug, Clone, Copy, PartialEq, FromRow, Serialize)]
pub struct EngagementSignals {
    pub favorite_count: i64,
    pub read_count: i64,
    pub reading_count: i64,
    /// Editorial rating carried through from the book record
    pub average_rating: f32,
}

/// A book joined with its current engagement signals
#[derive(Debug, Clone, FromRow)]
pub struct BookEngagement {
    #[sqlx(flatten)]
    pub book: Book,
    #[sqlx(flatten)]
    pub signals: EngagementSignals,
}

const SIGNAL_COLUMNS: &str = r#"
    (SELECT COUNT(*) FROM Favorites f WHERE f.book_id = b.book_id) AS favorite_count,
    (SELECT COUNT(*) FROM ReadBooks r WHERE r.book_id = b.book_id) AS read_count,
    (SELECT COUNT(*) FROM ReadingBooks g WHERE g.book_id = b.book_id) AS reading_count
"#;

/// Aggregate signals for a single book
///
/// Fails with `BookNotFound` when the id does not resolve.
pub async fn for_book(pool: &SqlitePool, book_id: &str) -> Result<EngagementSignals> {
    let sql = format!(
        "SELECT {SIGNAL_COLUMNS}, b.average_rating FROM Books b WHERE b.book_id = ?"
    );

    let signals = sqlx::query_as::<_, EngagementSignals>(&sql)
        .bind(book_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| CatalogError::book_not_found(book_id))?;

    Ok(signals)
}

/// Aggregate signals for the whole catalog in one pass
///
/// This is the full scan the trending ranker runs on every call.
pub async fn for_catalog(pool: &SqlitePool) -> Result<Vec<BookEngagement>> {
    let sql = format!("SELECT b.*, {SIGNAL_COLUMNS} FROM Books b");

    let rows = sqlx::query_as::<_, BookEngagement>(&sql)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}
