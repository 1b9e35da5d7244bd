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


//! First-run catalog seeding
//!
//! A bundled dataset bootstraps an empty catalog. Seeding runs in the
//! explicit startup path ([`crate::catalog::CatalogService::bootstrap`]),
//! never lazily on a read, and the whole ingestion is one transaction:
//! either the full dataset lands or none of it does.

use crate::error::{CatalogError, Result};
use crate::storage::models::NewBook;
use crate::storage::queries;
use serde::Deserialize;
use sqlx::SqlitePool;

/// Bundled seed dataset
const SEED_DATA: &str = include_str!("../../assets/seed_books.json");

/// One entry of the bundled dataset
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedBook {
    title: String,
    published_date: String,
    publisher: String,
    description: String,
    pages: i64,
    average_rating: f32,
    #[serde(default)]
    cover: Option<String>,
    #[serde(default)]
    identifier: Option<String>,
    authors: Vec<String>,
    genres: Vec<String>,
}

impl SeedBook {
    fn record(&self) -> NewBook {
        NewBook {
            title: self.title.clone(),
            published_date: self.published_date.clone(),
            publisher: self.publisher.clone(),
            description: self.description.clone(),
            pages: self.pages,
            average_rating: self.average_rating,
            users_rating: None,
            cover: self.cover.clone(),
            identifier: self.identifier.clone(),
        }
    }
}

/// Seed the bundled dataset when the catalog is empty
///
/// Idempotent: a non-empty catalog is left untouched. Returns the number
/// of books ingested (zero when nothing was seeded).
pub async fn seed_if_empty(pool: &SqlitePool) -> Result<usize> {
    if queries::count_books(pool).await? > 0 {
        tracing::debug!("catalog already populated, skipping seed");
        return Ok(0);
    }

    seed_catalog(pool).await
}

/// Ingest the bundled dataset unconditionally, in one transaction
pub async fn seed_catalog(pool: &SqlitePool) -> Result<usize> {
    let entries: Vec<SeedBook> = serde_json::from_str(SEED_DATA)
        .map_err(|e| CatalogError::SeedFailed(format!("bundled dataset is invalid: {}", e)))?;

    let mut tx = pool.begin().await?;

    for entry in &entries {
        let book_id = queries::insert_book(&mut *tx, &entry.record()).await?;

        for author in &entry.authors {
            let author_id = queries::find_or_create_author(&mut *tx, author).await?;
            queries::link_book_author(&mut *tx, &book_id, &author_id).await?;
        }
        for genre in &entry.genres {
            let genre_id = queries::find_or_create_genre(&mut *tx, genre).await?;
            queries::link_book_genre(&mut *tx, &book_id, &genre_id).await?;
        }
    }

    tx.commit().await?;

    tracing::info!(books = entries.len(), "seeded catalog from bundled dataset");

    Ok(entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::database::Database;

    #[tokio::test]
    async fn test_seed_populates_empty_catalog() {
        let db = Database::new_in_memory().await.expect("Failed to create database");

        let seeded = seed_if_empty(db.pool()).await.expect("Failed to seed");
        assert!(seeded > 0);

        let count = queries::count_books(db.pool()).await.expect("count");
        assert_eq!(count as usize, seeded);

        // Every seeded book must carry at least one resolved author
        let summaries = queries::list_book_summaries(db.pool()).await.expect("list");
        for summary in &summaries {
            assert!(
                !summary.authors().is_empty(),
                "seeded book '{}' has no author",
                summary.title
            );
            assert!(!summary.genres().is_empty());
        }
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let db = Database::new_in_memory().await.expect("Failed to create database");

        let first = seed_if_empty(db.pool()).await.expect("Failed to seed");
        let second = seed_if_empty(db.pool()).await.expect("Failed to re-seed");

        assert!(first > 0);
        assert_eq!(second, 0, "Second bootstrap must not ingest again");

        let count = queries::count_books(db.pool()).await.expect("count");
        assert_eq!(count as usize, first);
    }

    #[tokio::test]
    async fn test_seed_shares_natural_key_entities() {
        let db = Database::new_in_memory().await.expect("Failed to create database");
        seed_catalog(db.pool()).await.expect("Failed to seed");

        // Several seed entries share genres; the natural key must dedupe them
        let genre_rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Genres")
            .fetch_one(db.pool())
            .await
            .expect("count genres");
        let distinct: i64 = sqlx::query_scalar("SELECT COUNT(DISTINCT name) FROM Genres")
            .fetch_one(db.pool())
            .await
            .expect("count distinct");
        assert_eq!(genre_rows, distinct);
    }
}
