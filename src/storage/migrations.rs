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


//! Database migrations
//!
//! Schema creation and migrations for the catalog store.
//!
//! # Migration Strategy
//! sqlx's compile-time migration system requires a build-time database
//! connection, so migrations run as plain SQL at startup and are tracked
//! in the `_migrations` table.

use crate::error::Result;
use sqlx::{Executor, SqlitePool};

/// Run all database migrations
///
/// Creates the schema and applies any pending migrations. Safe to call on
/// every startup; applied migrations are skipped.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    create_migrations_table(pool).await?;

    run_migration(pool, 1, "initial_schema", create_initial_schema(pool)).await?;

    Ok(())
}

/// Create migrations tracking table
async fn create_migrations_table(pool: &SqlitePool) -> Result<()> {
    pool.execute(
        r#"
        CREATE TABLE IF NOT EXISTS _migrations (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .await?;

    Ok(())
}

/// Run a single migration if it hasn't been applied yet
async fn run_migration(
    pool: &SqlitePool,
    id: i32,
    name: &str,
    migration_fn: impl std::future::Future<Output = Result<()>>,
) -> Result<()> {
    let applied: Option<i32> = sqlx::query_scalar("SELECT id FROM _migrations WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    if applied.is_some() {
        return Ok(());
    }

    migration_fn.await?;

    sqlx::query("INSERT INTO _migrations (id, name) VALUES (?, ?)")
        .bind(id)
        .bind(name)
        .execute(pool)
        .await?;

    tracing::info!(migration = name, "applied database migration");

    Ok(())
}

/// Create initial database schema
///
/// Creates all tables with their relationships, indexes, and constraints.
async fn create_initial_schema(pool: &SqlitePool) -> Result<()> {
    pool.execute(
        r#"
-- ============================================================================
-- MAIN ENTITIES
-- ============================================================================

-- Books table: core catalog metadata
CREATE TABLE IF NOT EXISTS Books (
    book_id TEXT PRIMARY KEY,

    title TEXT NOT NULL,
    published_date TEXT NOT NULL,
    publisher TEXT NOT NULL,
    description TEXT NOT NULL,
    pages INTEGER NOT NULL,

    -- Ratings: average_rating is editorial, users_rating is user-derived
    -- and written by an external aggregator (nullable until then)
    average_rating REAL NOT NULL DEFAULT 0.0,
    users_rating REAL,

    cover TEXT,  -- Cover image URI
    identifier TEXT UNIQUE,  -- ISBN-like identifier

    -- Timestamps
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

-- Authors table: name is the natural key for find-or-create
CREATE TABLE IF NOT EXISTS Authors (
    author_id TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

-- Genres table: name is the natural key for find-or-create
CREATE TABLE IF NOT EXISTS Genres (
    genre_id TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

-- Users table: account records referenced by the engagement edges
CREATE TABLE IF NOT EXISTS Users (
    user_id TEXT PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL UNIQUE,
    profile_pic TEXT,

    -- Account flags
    active INTEGER NOT NULL DEFAULT 1,
    banned INTEGER NOT NULL DEFAULT 0,
    admin INTEGER NOT NULL DEFAULT 0,
    first_login INTEGER NOT NULL DEFAULT 1,

    -- Notification toggles as JSON
    notifications TEXT NOT NULL DEFAULT '{"all":false,"expDate":false,"newBooks":false}',

    -- Externally-authenticated vs local account
    google_user INTEGER NOT NULL DEFAULT 0
);

-- ============================================================================
-- JUNCTION TABLES (Many-to-Many Relationships)
-- ============================================================================

-- BookAuthors: Book <-> Author junction
CREATE TABLE IF NOT EXISTS BookAuthors (
    book_id TEXT NOT NULL,
    author_id TEXT NOT NULL,
    FOREIGN KEY (book_id) REFERENCES Books(book_id) ON DELETE CASCADE,
    FOREIGN KEY (author_id) REFERENCES Authors(author_id) ON DELETE CASCADE,
    PRIMARY KEY (book_id, author_id)
);

-- BookGenres: Book <-> Genre junction
CREATE TABLE IF NOT EXISTS BookGenres (
    book_id TEXT NOT NULL,
    genre_id TEXT NOT NULL,
    FOREIGN KEY (book_id) REFERENCES Books(book_id) ON DELETE CASCADE,
    FOREIGN KEY (genre_id) REFERENCES Genres(genre_id) ON DELETE CASCADE,
    PRIMARY KEY (book_id, genre_id)
);

-- Engagement edges: one table per kind, keyed (user_id, book_id).
-- The composite primary key makes every edge set idempotent, and the
-- Users foreign key stops edges from inventing phantom users.
CREATE TABLE IF NOT EXISTS Favorites (
    user_id TEXT NOT NULL,
    book_id TEXT NOT NULL,
    FOREIGN KEY (user_id) REFERENCES Users(user_id) ON DELETE CASCADE,
    FOREIGN KEY (book_id) REFERENCES Books(book_id) ON DELETE CASCADE,
    PRIMARY KEY (user_id, book_id)
);

CREATE TABLE IF NOT EXISTS ReadBooks (
    user_id TEXT NOT NULL,
    book_id TEXT NOT NULL,
    FOREIGN KEY (user_id) REFERENCES Users(user_id) ON DELETE CASCADE,
    FOREIGN KEY (book_id) REFERENCES Books(book_id) ON DELETE CASCADE,
    PRIMARY KEY (user_id, book_id)
);

CREATE TABLE IF NOT EXISTS ReadingBooks (
    user_id TEXT NOT NULL,
    book_id TEXT NOT NULL,
    FOREIGN KEY (user_id) REFERENCES Users(user_id) ON DELETE CASCADE,
    FOREIGN KEY (book_id) REFERENCES Books(book_id) ON DELETE CASCADE,
    PRIMARY KEY (user_id, book_id)
);

-- ============================================================================
-- INDEXES for Performance
-- ============================================================================

-- Books indexes
CREATE INDEX IF NOT EXISTS idx_books_title ON Books(title);
CREATE INDEX IF NOT EXISTS idx_books_identifier ON Books(identifier);

-- Natural key lookups
CREATE INDEX IF NOT EXISTS idx_authors_name ON Authors(name);
CREATE INDEX IF NOT EXISTS idx_genres_name ON Genres(name);

-- Junction lookups by the non-leading key
CREATE INDEX IF NOT EXISTS idx_book_authors_author ON BookAuthors(author_id);
CREATE INDEX IF NOT EXISTS idx_book_genres_genre ON BookGenres(genre_id);

-- Per-book edge counting (the primary key leads with user_id)
CREATE INDEX IF NOT EXISTS idx_favorites_book ON Favorites(book_id);
CREATE INDEX IF NOT EXISTS idx_read_books_book ON ReadBooks(book_id);
CREATE INDEX IF NOT EXISTS idx_reading_books_book ON ReadingBooks(book_id);

-- ============================================================================
-- TRIGGERS for Automatic Timestamp Updates
-- ============================================================================

-- Trigger to update updated_at timestamp when book is modified
CREATE TRIGGER IF NOT EXISTS update_books_timestamp
AFTER UPDATE ON Books
FOR EACH ROW
BEGIN
    UPDATE Books SET updated_at = CURRENT_TIMESTAMP WHERE book_id = NEW.book_id;
END;
        "#,
    )
    .await?;

    Ok(())
}
