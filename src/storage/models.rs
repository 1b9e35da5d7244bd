//! Database models for the Bookhive catalog
//!
//! Entity models for the catalog store, mapped to SQLite with sqlx.
//!
//! # SQLite Adaptations
//! - Entity ids are UUID v4 stored as hyphenated TEXT
//! - Booleans stored as INTEGER 0/1
//! - Notification preferences stored as a JSON string (SQLite has no map type)
//! - Many-to-many relationships use junction tables, one per edge kind
//! - DateTime stored as TEXT (CURRENT_TIMESTAMP format)

use crate::error::CatalogError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// ENUMS
// ============================================================================

/// The three independent user↔book engagement edge kinds
///
/// A (user, book) pair may hold any subset of these simultaneously; the
/// kinds are independent, not mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementKind {
    Favorite,
    Read,
    Reading,
}

impl EngagementKind {
    /// All kinds, in a stable order
    pub const ALL: [EngagementKind; 3] = [
        EngagementKind::Favorite,
        EngagementKind::Read,
        EngagementKind::Reading,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EngagementKind::Favorite => "favorite",
            EngagementKind::Read => "read",
            EngagementKind::Reading => "reading",
        }
    }

    /// Edge table backing this kind. Table names cannot be bound as SQL
    /// parameters, so callers interpolate this constant into their queries.
    pub(crate) fn table(&self) -> &'static str {
        match self {
            EngagementKind::Favorite => "Favorites",
            EngagementKind::Read => "ReadBooks",
            EngagementKind::Reading => "ReadingBooks",
        }
    }
}

impl fmt::Display for EngagementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngagementKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "favorite" => Ok(EngagementKind::Favorite),
            "read" => Ok(EngagementKind::Read),
            "reading" => Ok(EngagementKind::Reading),
            other => Err(CatalogError::invalid_input(format!(
                "unknown engagement kind '{}' (expected favorite, read or reading)",
                other
            ))),
        }
    }
}

// ============================================================================
// MAIN ENTITIES
// ============================================================================

/// Book entity - core catalog metadata
///
/// `average_rating` is the editorial rating supplied at ingestion;
/// `users_rating` is the user-derived aggregate maintained by an external
/// collaborator. Neither is recomputed by this crate.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Book {
    /// Primary key (UUID v4, hyphenated text)
    pub book_id: String,

    pub title: String,
    pub published_date: String,
    pub publisher: String,
    pub description: String,
    pub pages: i64,

    /// Editorial rating, externally supplied
    pub average_rating: f32,
    /// User-derived rating, absent until the external aggregator writes it
    #[sqlx(default)]
    pub users_rating: Option<f32>,

    /// Cover image URI
    #[sqlx(default)]
    pub cover: Option<String>,
    /// ISBN-like unique identifier
    #[sqlx(default)]
    pub identifier: Option<String>,

    // Timestamps
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Author entity. `name` is the natural key used for find-or-create.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Author {
    pub author_id: String,
    pub name: String,
}

/// Genre entity. `name` is the natural key used for find-or-create.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Genre {
    pub genre_id: String,
    pub name: String,
}

/// User entity
///
/// The catalog core never creates users implicitly; it only references
/// them from engagement edges. Account lifecycle lives with the caller.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub username: String,
    pub email: String,
    #[sqlx(default)]
    pub profile_pic: Option<String>,

    // Account flags
    pub active: bool,
    pub banned: bool,
    pub admin: bool,
    pub first_login: bool,

    /// Notification toggles as a JSON string, see [`NotificationPrefs`]
    pub notifications: String,

    /// Externally-authenticated (true) vs local account (false)
    pub google_user: bool,
}

impl User {
    /// Parse the notification toggles, falling back to all-off on corrupt JSON
    pub fn notification_prefs(&self) -> NotificationPrefs {
        serde_json::from_str(&self.notifications).unwrap_or_default()
    }
}

/// Named notification toggles stored on the user record
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationPrefs {
    #[serde(default)]
    pub all: bool,
    #[serde(default, rename = "expDate")]
    pub exp_date: bool,
    #[serde(default, rename = "newBooks")]
    pub new_books: bool,
}

// ============================================================================
// NEW RECORD STRUCTS (for inserts)
// ============================================================================

/// New book record for insertion. The id is generated at insert time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub published_date: String,
    pub publisher: String,
    pub description: String,
    pub pages: i64,
    pub average_rating: f32,
    pub users_rating: Option<f32>,
    pub cover: Option<String>,
    pub identifier: Option<String>,
}

/// New user record for insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub profile_pic: Option<String>,
    pub notifications: NotificationPrefs,
    pub google_user: bool,
}

impl NewUser {
    pub fn new(username: String, email: String) -> Self {
        Self {
            username,
            email,
            profile_pic: None,
            notifications: NotificationPrefs::default(),
            google_user: false,
        }
    }
}

// ============================================================================
// READ MODELS
// ============================================================================

/// Book with resolved associations, as returned by the service surface
///
/// Author and genre names come back comma-joined from a GROUP_CONCAT;
/// use [`BookSummary::authors`] / [`BookSummary::genres`] to split them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookSummary {
    pub book_id: String,
    pub title: String,
    pub published_date: String,
    pub publisher: String,
    pub description: String,
    pub pages: i64,
    pub average_rating: f32,
    pub users_rating: Option<f32>,
    pub cover: Option<String>,
    pub identifier: Option<String>,
    pub created_at: String,
    pub updated_at: String,

    // Related data (comma-separated strings)
    pub authors_str: Option<String>,
    pub genres_str: Option<String>,
}

impl BookSummary {
    /// Resolved author names
    pub fn authors(&self) -> Vec<String> {
        split_concat(&self.authors_str)
    }

    /// Resolved genre names
    pub fn genres(&self) -> Vec<String> {
        split_concat(&self.genres_str)
    }
}

fn split_concat(value: &Option<String>) -> Vec<String> {
    value
        .as_ref()
        .map(|v| {
            v.split(", ")
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}
