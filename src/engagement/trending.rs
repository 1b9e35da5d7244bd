// Bookhive Core - Book Catalog Engine
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


//! Trending ranking
//!
//! Orders the catalog by a composite engagement score:
//!
//! ```text
//! score = 4·favorites + 2·read + 1·reading + average_rating
//! ```
//!
//! Interaction counts dominate: a single favorite outweighs the entire
//! 0–5 rating scale, so rating separates books with comparable
//! engagement instead of overriding popularity. The score is monotonic in
//! every signal — raising any one count (or the rating) with the others
//! held fixed never lowers a book's score.
//!
//! Ordering is descending by score with ties broken by ascending book id,
//! so repeated calls over identical state return identical sequences.
//!
//! The ranking runs a full catalog scan on every call. That is the right
//! trade while the catalog fits comfortably in one query; an incremental
//! top-K index only becomes worth its complexity well past that point.

use crate::engagement::signals::{self, EngagementSignals};
use crate::error::{CatalogError, Result};
use crate::storage::models::Book;
use sqlx::SqlitePool;
use std::cmp::Ordering;

/// Weight of one favorite edge
pub const FAVORITE_WEIGHT: f64 = 4.0;
/// Weight of one read edge
pub const READ_WEIGHT: f64 = 2.0;
/// Weight of one currently-reading edge
pub const READING_WEIGHT: f64 = 1.0;

/// A catalog entry with its computed trending score
#[derive(Debug, Clone)]
pub struct RankedBook {
    pub book: Book,
    pub signals: EngagementSignals,
    pub score: f64,
}

/// Compute the composite trending score for one signal tuple
pub fn score(signals: &EngagementSignals) -> f64 {
    FAVORITE_WEIGHT * signals.favorite_count as f64
        + READ_WEIGHT * signals.read_count as f64
        + READING_WEIGHT * signals.reading_count as f64
        + f64::from(signals.average_rating)
}

/// Rank the full catalog and return the top `limit` entries
///
/// An empty catalog yields an empty vec, not an error; `RankingFailed`
/// is reserved for failures of the aggregation scan itself.
pub async fn rank(pool: &SqlitePool, limit: usize) -> Result<Vec<RankedBook>> {
    let rows = signals::for_catalog(pool)
        .await
        .map_err(|e| CatalogError::RankingFailed(e.to_string()))?;

    let mut ranked: Vec<RankedBook> = rows
        .into_iter()
        .map(|entry| RankedBook {
            score: score(&entry.signals),
            book: entry.book,
            signals: entry.signals,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.book.book_id.cmp(&b.book.book_id))
    });
    ranked.truncate(limit);

    tracing::debug!(returned = ranked.len(), "trending ranking computed");

    Ok(ranked)
}
