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


//! Database query functions
//!
//! Repository layer for the catalog store.
//!
//! # Query Patterns
//! - Free functions per entity type, async throughout
//! - Single-statement functions are generic over the executor so they can
//!   run on the pool directly or inside a transaction
//! - Find-or-create resolves races through the natural-key unique
//!   constraint: `ON CONFLICT ... DO UPDATE ... RETURNING` degrades a
//!   losing insert into a lookup
//! - Resolved associations use GROUP_CONCAT CTEs folded into one row set

use crate::error::Result;
use crate::storage::models::{Author, Book, BookSummary, Genre, NewBook, NewUser, User};
use sqlx::{Executor, Sqlite, SqlitePool};
use uuid::Uuid;

/// Shared SELECT producing [`BookSummary`] rows with resolved
/// author/genre names. Callers append WHERE/ORDER BY clauses.
const BOOK_SUMMARY_SELECT: &str = r#"
WITH book_authors AS (
    SELECT
        ba.book_id,
        GROUP_CONCAT(a.name, ', ') AS authors
    FROM BookAuthors ba
    JOIN Authors a ON ba.author_id = a.author_id
    GROUP BY ba.book_id
),
book_genres AS (
    SELECT
        bg.book_id,
        GROUP_CONCAT(g.name, ', ') AS genres
    FROM BookGenres bg
    JOIN Genres g ON bg.genre_id = g.genre_id
    GROUP BY bg.book_id
)
SELECT
    b.book_id,
    b.title,
    b.published_date,
    b.publisher,
    b.description,
    b.pages,
    b.average_rating,
    b.users_rating,
    b.cover,
    b.identifier,
    b.created_at,
    b.updated_at,
    ba.authors AS authors_str,
    bg.genres AS genres_str
FROM Books b
LEFT JOIN book_authors ba ON b.book_id = ba.book_id
LEFT JOIN book_genres bg ON b.book_id = bg.book_id
"#;

// ============================================================================
// BOOK QUERIES
// ============================================================================

/// Insert a new book
///
/// Generates the book id and returns it.
pub async fn insert_book<'e, E>(executor: E, book: &NewBook) -> Result<String>
where
    E: Executor<'e, Database = Sqlite>,
{
    let book_id = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO Books (
            book_id, title, published_date, publisher, description,
            pages, average_rating, users_rating, cover, identifier
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&book_id)
    .bind(&book.title)
    .bind(&book.published_date)
    .bind(&book.publisher)
    .bind(&book.description)
    .bind(book.pages)
    .bind(book.average_rating)
    .bind(book.users_rating)
    .bind(&book.cover)
    .bind(&book.identifier)
    .execute(executor)
    .await?;

    Ok(book_id)
}

/// Find book by ID
pub async fn find_book_by_id(pool: &SqlitePool, book_id: &str) -> Result<Option<Book>> {
    let book = sqlx::query_as::<_, Book>("SELECT * FROM Books WHERE book_id = ?")
        .bind(book_id)
        .fetch_optional(pool)
        .await?;

    Ok(book)
}

/// Check that a book row exists without materializing it
pub async fn book_exists<'e, E>(executor: E, book_id: &str) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let found: Option<i32> = sqlx::query_scalar("SELECT 1 FROM Books WHERE book_id = ?")
        .bind(book_id)
        .fetch_optional(executor)
        .await?;

    Ok(found.is_some())
}

/// Count total books
pub async fn count_books<'e, E>(executor: E) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Books")
        .fetch_one(executor)
        .await?;

    Ok(count)
}

/// List all books with resolved associations, ordered by title
pub async fn list_book_summaries(pool: &SqlitePool) -> Result<Vec<BookSummary>> {
    let sql = format!("{BOOK_SUMMARY_SELECT} ORDER BY b.title");
    let books = sqlx::query_as::<_, BookSummary>(&sql).fetch_all(pool).await?;

    Ok(books)
}

/// Search books by title substring (case-insensitive LIKE)
pub async fn search_book_summaries(pool: &SqlitePool, title: &str) -> Result<Vec<BookSummary>> {
    let sql = format!("{BOOK_SUMMARY_SELECT} WHERE b.title LIKE ? ORDER BY b.title");
    let pattern = format!("%{}%", title);
    let books = sqlx::query_as::<_, BookSummary>(&sql)
        .bind(&pattern)
        .fetch_all(pool)
        .await?;

    Ok(books)
}

/// Fetch a single book with resolved associations
pub async fn find_book_summary_by_id(
    pool: &SqlitePool,
    book_id: &str,
) -> Result<Option<BookSummary>> {
    let sql = format!("{BOOK_SUMMARY_SELECT} WHERE b.book_id = ?");
    let book = sqlx::query_as::<_, BookSummary>(&sql)
        .bind(book_id)
        .fetch_optional(pool)
        .await?;

    Ok(book)
}

/// Fetch books matching a title exactly, with resolved associations
pub async fn find_book_summaries_by_title(
    pool: &SqlitePool,
    title: &str,
) -> Result<Vec<BookSummary>> {
    let sql = format!("{BOOK_SUMMARY_SELECT} WHERE b.title = ? ORDER BY b.created_at");
    let books = sqlx::query_as::<_, BookSummary>(&sql)
        .bind(title)
        .fetch_all(pool)
        .await?;

    Ok(books)
}

// ============================================================================
// AUTHOR / GENRE QUERIES (natural-key find-or-create)
// ============================================================================

/// Find or create an author by name
///
/// Returns the author_id (either existing or newly created). Concurrent
/// creates of the same name are arbitrated by the UNIQUE constraint; the
/// conflicting insert resolves to a lookup of the existing row.
pub async fn find_or_create_author<'e, E>(executor: E, name: &str) -> Result<String>
where
    E: Executor<'e, Database = Sqlite>,
{
    let author_id: String = sqlx::query_scalar(
        r#"
        INSERT INTO Authors (author_id, name) VALUES (?, ?)
        ON CONFLICT(name) DO UPDATE SET name = excluded.name
        RETURNING author_id
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(name)
    .fetch_one(executor)
    .await?;

    Ok(author_id)
}

/// Find or create a genre by name
///
/// Same conflict-as-lookup contract as [`find_or_create_author`].
pub async fn find_or_create_genre<'e, E>(executor: E, name: &str) -> Result<String>
where
    E: Executor<'e, Database = Sqlite>,
{
    let genre_id: String = sqlx::query_scalar(
        r#"
        INSERT INTO Genres (genre_id, name) VALUES (?, ?)
        ON CONFLICT(name) DO UPDATE SET name = excluded.name
        RETURNING genre_id
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(name)
    .fetch_one(executor)
    .await?;

    Ok(genre_id)
}

/// Link book to author
pub async fn link_book_author<'e, E>(executor: E, book_id: &str, author_id: &str) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("INSERT OR IGNORE INTO BookAuthors (book_id, author_id) VALUES (?, ?)")
        .bind(book_id)
        .bind(author_id)
        .execute(executor)
        .await?;

    Ok(())
}

/// Link book to genre
pub async fn link_book_genre<'e, E>(executor: E, book_id: &str, genre_id: &str) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("INSERT OR IGNORE INTO BookGenres (book_id, genre_id) VALUES (?, ?)")
        .bind(book_id)
        .bind(genre_id)
        .execute(executor)
        .await?;

    Ok(())
}

/// Find author by natural key
pub async fn find_author_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Author>> {
    let author = sqlx::query_as::<_, Author>("SELECT * FROM Authors WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    Ok(author)
}

/// Find genre by natural key
pub async fn find_genre_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Genre>> {
    let genre = sqlx::query_as::<_, Genre>("SELECT * FROM Genres WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    Ok(genre)
}

/// Count author rows matching a name (diagnostics and tests)
pub async fn count_authors_named(pool: &SqlitePool, name: &str) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Authors WHERE name = ?")
        .bind(name)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

// ============================================================================
// USER QUERIES
// ============================================================================

/// Insert a new user, returning the generated user_id
pub async fn insert_user(pool: &SqlitePool, user: &NewUser) -> Result<String> {
    let user_id = Uuid::new_v4().to_string();
    let notifications = serde_json::to_string(&user.notifications)?;

    sqlx::query(
        r#"
        INSERT INTO Users (user_id, username, email, profile_pic, notifications, google_user)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&user_id)
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.profile_pic)
    .bind(&notifications)
    .bind(user.google_user)
    .execute(pool)
    .await?;

    Ok(user_id)
}

/// Find user by ID
pub async fn find_user_by_id(pool: &SqlitePool, user_id: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM Users WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Find user by username
pub async fn find_user_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM Users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}
