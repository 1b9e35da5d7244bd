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


//! Database storage and models
//!
//! All persistence for the catalog lives here, on SQLite via sqlx.
//!
//! # Database Schema
//! - Books: catalog metadata (title, publisher, ratings, identifier)
//! - Authors / Genres: natural-key entities resolved by find-or-create
//! - Users: account records referenced by engagement edges
//! - BookAuthors / BookGenres: many-to-many junction tables
//! - Favorites / ReadBooks / ReadingBooks: the three engagement edge sets
//!
//! # Usage Example
//! ```no_run
//! use bookhive_core::storage::{queries, Database};
//! use bookhive_core::storage::models::NewBook;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new("./catalog.db").await?;
//!
//! let book_id = queries::insert_book(
//!     db.pool(),
//!     &NewBook {
//!         title: "The Dispossessed".to_string(),
//!         published_date: "1974".to_string(),
//!         publisher: "Harper & Row".to_string(),
//!         description: "An ambiguous utopia.".to_string(),
//!         pages: 341,
//!         average_rating: 4.2,
//!         users_rating: None,
//!         cover: None,
//!         identifier: Some("ISBN:9780060125639".to_string()),
//!     },
//! )
//! .await?;
//!
//! let book = queries::find_book_by_id(db.pool(), &book_id).await?;
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;

// Re-export commonly used types
pub use database::Database;
pub use models::{
    Author, Book, BookSummary, EngagementKind, Genre, NewBook, NewUser, NotificationPrefs, User,
};
