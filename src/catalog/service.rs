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


//! Catalog service facade
//!
//! The one entry point the routing layer talks to. Composes the storage
//! queries, the engagement graph, and the trending ranker; everything
//! else in this crate is an implementation detail behind it.
//!
//! # Operation surface
//! - `bootstrap` - explicit startup step (migrations ran at open; this
//!   seeds an empty catalog)
//! - `create_book` - validate, resolve author/genre, insert + link in one
//!   transaction, return the re-fetched book
//! - `list_books` - full catalog or title search
//! - `get_book_by_id` - id-validated point lookup
//! - `mutate_engagement` - add/remove one engagement edge
//! - `trending` - ranked top-N
//! - `create_user` / `get_user` - thin user CRUD for the edge tables'
//!   referential integrity

use crate::catalog::seed;
use crate::catalog::validate::{validate_entity_id, CreateBookRequest};
use crate::config::CatalogConfig;
use crate::engagement::{graph, trending, RankedBook};
use crate::error::{CatalogError, Result};
use crate::storage::models::{BookSummary, EngagementKind, NewUser, User};
use crate::storage::{queries, Database};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of an engagement mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementOp {
    Add,
    Remove,
}

impl fmt::Display for EngagementOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngagementOp::Add => f.write_str("add"),
            EngagementOp::Remove => f.write_str("remove"),
        }
    }
}

/// Public operation surface of the catalog core
#[derive(Debug, Clone)]
pub struct CatalogService {
    db: Database,
    config: CatalogConfig,
}

impl CatalogService {
    /// Wrap an already-opened database
    pub fn new(db: Database, config: CatalogConfig) -> Self {
        Self { db, config }
    }

    /// Open (or create) the configured database and wrap it
    pub async fn open(config: CatalogConfig) -> Result<Self> {
        let db = Database::new(config.resolved_database_path()).await?;
        Ok(Self::new(db, config))
    }

    /// Access the underlying database handle
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Explicit startup step: seed the bundled dataset into an empty catalog
    ///
    /// Idempotent, and intended to run exactly once at service startup so
    /// no read path ever mutates the store as a side effect. Returns the
    /// number of seeded books (zero when the catalog was populated or
    /// seeding is disabled).
    pub async fn bootstrap(&self) -> Result<usize> {
        if !self.config.seed_on_bootstrap {
            tracing::debug!("seed_on_bootstrap disabled, skipping");
            return Ok(0);
        }

        seed::seed_if_empty(self.db.pool()).await
    }

    /// Create a book with author/genre resolution
    ///
    /// Validates required fields (reporting every missing one), resolves
    /// authorName/genreName by find-or-create, then inserts the book and
    /// both junction links inside a single transaction so a partial
    /// failure cannot leave an orphaned book. The response is the book
    /// re-fetched by title, with associations resolved.
    pub async fn create_book(&self, request: CreateBookRequest) -> Result<BookSummary> {
        let validated = request.validate()?;
        let pool = self.db.pool();

        let mut tx = pool.begin().await?;

        let author_id = queries::find_or_create_author(&mut *tx, &validated.author_name).await?;
        let genre_id = queries::find_or_create_genre(&mut *tx, &validated.genre_name).await?;

        let book_id = queries::insert_book(&mut *tx, &validated.book)
            .await
            .map_err(creation_failure)?;

        queries::link_book_author(&mut *tx, &book_id, &author_id).await?;
        queries::link_book_genre(&mut *tx, &book_id, &genre_id).await?;

        tx.commit().await?;

        tracing::info!(%book_id, title = %validated.book.title, "book created");

        // Re-fetch by title so the caller sees the resolved associations
        let created = queries::find_book_summaries_by_title(pool, &validated.book.title)
            .await?
            .into_iter()
            .find(|summary| summary.book_id == book_id)
            .ok_or_else(|| {
                CatalogError::InvalidState(format!("created book {} not re-fetchable", book_id))
            })?;

        Ok(created)
    }

    /// List the catalog, optionally filtered by title substring
    ///
    /// Zero matches under a filter come back as an empty vec; the caller
    /// decides whether that is a not-found condition on its surface.
    pub async fn list_books(&self, title_filter: Option<&str>) -> Result<Vec<BookSummary>> {
        match title_filter {
            Some(title) => queries::search_book_summaries(self.db.pool(), title).await,
            None => queries::list_book_summaries(self.db.pool()).await,
        }
    }

    /// Fetch one book by id
    ///
    /// Malformed ids fail validation before the store is touched, so the
    /// caller can tell a bad request from a missing book.
    pub async fn get_book_by_id(&self, book_id: &str) -> Result<BookSummary> {
        validate_entity_id(book_id)?;

        queries::find_book_summary_by_id(self.db.pool(), book_id)
            .await?
            .ok_or_else(|| CatalogError::book_not_found(book_id))
    }

    /// Add or remove one engagement edge, returning the affected book
    pub async fn mutate_engagement(
        &self,
        kind: EngagementKind,
        book_id: &str,
        user_id: &str,
        op: EngagementOp,
    ) -> Result<BookSummary> {
        validate_entity_id(book_id)?;
        validate_entity_id(user_id)?;

        let summary = queries::find_book_summary_by_id(self.db.pool(), book_id)
            .await?
            .ok_or_else(|| CatalogError::book_not_found(book_id))?;

        match op {
            EngagementOp::Add => graph::add_edge(self.db.pool(), kind, book_id, user_id).await?,
            EngagementOp::Remove => {
                graph::remove_edge(self.db.pool(), kind, book_id, user_id).await?
            }
        }

        tracing::info!(%kind, %op, book_id, user_id, "engagement mutated");

        Ok(summary)
    }

    /// Compute the trending list (descending score, configured size)
    ///
    /// An empty catalog is a valid empty result; `RankingFailed` only
    /// surfaces when the aggregation itself fails.
    pub async fn trending(&self) -> Result<Vec<RankedBook>> {
        trending::rank(self.db.pool(), self.config.trending_limit).await
    }

    /// Create a user record
    pub async fn create_user(&self, user: NewUser) -> Result<User> {
        let user_id = queries::insert_user(self.db.pool(), &user).await?;

        queries::find_user_by_id(self.db.pool(), &user_id)
            .await?
            .ok_or_else(|| {
                CatalogError::InvalidState(format!("created user {} not re-fetchable", user_id))
            })
    }

    /// Fetch one user by id
    pub async fn get_user(&self, user_id: &str) -> Result<User> {
        validate_entity_id(user_id)?;

        queries::find_user_by_id(self.db.pool(), user_id)
            .await?
            .ok_or_else(|| CatalogError::not_found(format!("user {}", user_id)))
    }
}

/// Collapse store-level insert failures into one creation error with the
/// underlying reason attached
fn creation_failure(err: CatalogError) -> CatalogError {
    match &err {
        CatalogError::SqlxError(sqlx::Error::Database(db)) => {
            CatalogError::CreationFailed(db.message().to_string())
        }
        _ => err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn service() -> CatalogService {
        let db = Database::new_in_memory().await.expect("Failed to create database");
        CatalogService::new(
            db,
            CatalogConfig {
                seed_on_bootstrap: false,
                ..Default::default()
            },
        )
    }

    fn dispossessed_request() -> CreateBookRequest {
        CreateBookRequest {
            title: Some("The Dispossessed".to_string()),
            published_date: Some("1974".to_string()),
            publisher: Some("Harper & Row".to_string()),
            description: Some("An ambiguous utopia.".to_string()),
            pages: Some(341),
            average_rating: Some(4.2),
            users_rating: None,
            cover: None,
            identifier: Some("ISBN:9780060125639".to_string()),
            author_name: Some("Ursula K. Le Guin".to_string()),
            genre_name: Some("Science Fiction".to_string()),
        }
    }

    async fn sample_user(svc: &CatalogService, name: &str) -> User {
        svc.create_user(NewUser::new(
            name.to_string(),
            format!("{name}@example.com"),
        ))
        .await
        .expect("Failed to create user")
    }

    #[tokio::test]
    async fn test_create_book_resolves_associations() {
        let svc = service().await;

        let created = svc
            .create_book(dispossessed_request())
            .await
            .expect("Failed to create book");

        assert_eq!(created.title, "The Dispossessed");
        assert_eq!(created.authors(), vec!["Ursula K. Le Guin".to_string()]);
        assert_eq!(created.genres(), vec!["Science Fiction".to_string()]);
    }

    #[tokio::test]
    async fn test_create_book_reports_missing_fields() {
        let svc = service().await;

        let err = svc
            .create_book(CreateBookRequest::default())
            .await
            .expect_err("Empty request must fail validation");

        match err {
            CatalogError::MissingRequiredFields { fields } => {
                assert!(fields.contains(&"title".to_string()));
                assert!(fields.contains(&"authorName".to_string()));
            }
            other => panic!("Expected MissingRequiredFields, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_book_shared_author_single_row() {
        let svc = service().await;

        svc.create_book(dispossessed_request())
            .await
            .expect("Failed to create book");

        let mut second = dispossessed_request();
        second.title = Some("The Lathe of Heaven".to_string());
        second.identifier = Some("ISBN:9781416556961".to_string());
        let created = svc.create_book(second).await.expect("Failed to create book");

        assert_eq!(created.authors(), vec!["Ursula K. Le Guin".to_string()]);

        let authors = queries::count_authors_named(svc.database().pool(), "Ursula K. Le Guin")
            .await
            .expect("count");
        assert_eq!(authors, 1, "Find-or-create must not duplicate the author");
    }

    #[tokio::test]
    async fn test_create_book_duplicate_identifier_rolls_back() {
        let svc = service().await;

        svc.create_book(dispossessed_request())
            .await
            .expect("Failed to create book");

        let mut duplicate = dispossessed_request();
        duplicate.title = Some("Shadow Copy".to_string());
        let err = svc
            .create_book(duplicate)
            .await
            .expect_err("Duplicate identifier must fail");
        assert!(matches!(err, CatalogError::CreationFailed(_)));

        // The failed creation must not leave a partially linked book
        let books = svc.list_books(None).await.expect("list");
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "The Dispossessed");
    }

    #[tokio::test]
    async fn test_get_book_malformed_vs_missing() {
        let svc = service().await;

        let malformed = svc
            .get_book_by_id("definitely-not-a-uuid")
            .await
            .expect_err("must fail validation");
        assert!(malformed.is_validation());

        let missing = svc
            .get_book_by_id("7c9e6679-7425-40de-944b-e07fc1f90ae7")
            .await
            .expect_err("must be not-found");
        assert!(missing.is_not_found());
    }

    #[tokio::test]
    async fn test_list_books_filter_empty_is_ok() {
        let svc = service().await;
        svc.create_book(dispossessed_request())
            .await
            .expect("Failed to create book");

        let all = svc.list_books(None).await.expect("list");
        assert_eq!(all.len(), 1);

        let hits = svc.list_books(Some("Dispossessed")).await.expect("search");
        assert_eq!(hits.len(), 1);

        let none = svc.list_books(Some("Earthsea")).await.expect("search");
        assert!(none.is_empty(), "Zero matches must be an empty vec, not an error");
    }

    #[tokio::test]
    async fn test_mutate_engagement_round_trip() {
        let svc = service().await;
        let book = svc
            .create_book(dispossessed_request())
            .await
            .expect("Failed to create book");
        let user = sample_user(&svc, "shevek").await;

        let summary = svc
            .mutate_engagement(
                EngagementKind::Favorite,
                &book.book_id,
                &user.user_id,
                EngagementOp::Add,
            )
            .await
            .expect("Failed to add engagement");
        assert_eq!(summary.book_id, book.book_id);

        let count = graph::count_edges(svc.database().pool(), EngagementKind::Favorite, &book.book_id)
            .await
            .expect("count");
        assert_eq!(count, 1);

        svc.mutate_engagement(
            EngagementKind::Favorite,
            &book.book_id,
            &user.user_id,
            EngagementOp::Remove,
        )
        .await
        .expect("Failed to remove engagement");

        let count = graph::count_edges(svc.database().pool(), EngagementKind::Favorite, &book.book_id)
            .await
            .expect("count");
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_mutate_engagement_unknown_book() {
        let svc = service().await;
        let user = sample_user(&svc, "takver").await;

        let err = svc
            .mutate_engagement(
                EngagementKind::Read,
                "7c9e6679-7425-40de-944b-e07fc1f90ae7",
                &user.user_id,
                EngagementOp::Add,
            )
            .await
            .expect_err("must be not-found");
        assert!(matches!(err, CatalogError::BookNotFound(_)));
    }

    #[tokio::test]
    async fn test_trending_respects_configured_limit() {
        let db = Database::new_in_memory().await.expect("Failed to create database");
        let svc = CatalogService::new(
            db,
            CatalogConfig {
                trending_limit: 3,
                seed_on_bootstrap: true,
                ..Default::default()
            },
        );

        assert!(svc.trending().await.expect("empty trending").is_empty());

        let seeded = svc.bootstrap().await.expect("Failed to bootstrap");
        assert!(seeded > 3);

        let trending = svc.trending().await.expect("trending");
        assert_eq!(trending.len(), 3);
    }

    #[tokio::test]
    async fn test_bootstrap_runs_once() {
        let db = Database::new_in_memory().await.expect("Failed to create database");
        let svc = CatalogService::new(db, CatalogConfig::default());

        let first = svc.bootstrap().await.expect("bootstrap");
        let second = svc.bootstrap().await.expect("bootstrap");
        assert!(first > 0);
        assert_eq!(second, 0);
    }
}
