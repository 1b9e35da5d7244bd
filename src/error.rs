//! Error types for Bookhive
//!
//! This module defines error types using thiserror for ergonomic error handling.
//! Errors are categorized by domain (validation, lookup, ranking, storage) so
//! the routing layer can map them to whatever transport it speaks without this
//! crate knowing about status codes.

use thiserror::Error;

/// Result type alias using our CatalogError type
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Main error type for the catalog core
///
/// Each variant includes enough context for the caller to either correct the
/// request (validation errors) or report the failure (everything else).
#[derive(Error, Debug)]
pub enum CatalogError {
    // ===== Validation Errors =====
    // Always caller-correctable; the message names the offending input.

    /// One or more required fields were absent from a create request
    #[error("missing required fields: {}", fields.join(", "))]
    MissingRequiredFields {
        /// Field names, in declaration order
        fields: Vec<String>,
    },

    /// An entity id did not parse as a UUID
    #[error("invalid id '{value}': {reason}")]
    InvalidId { value: String, reason: String },

    /// Generic input validation error
    #[error("invalid input: {0}")]
    InvalidInput(String),

    // ===== Lookup Errors =====

    /// Book id or title did not resolve to a catalog entry
    #[error("book not found: {0}")]
    BookNotFound(String),

    /// Some other record (user, author, genre) was absent
    #[error("record not found: {0}")]
    RecordNotFound(String),

    // ===== Ranking Errors =====

    /// The trending aggregation itself failed (store unreachable, bad row).
    /// An empty catalog is NOT a ranking error; it yields an empty list.
    #[error("trending ranking failed: {0}")]
    RankingFailed(String),

    // ===== Creation Errors =====

    /// Multi-step book creation failed; the transaction was rolled back
    /// and the underlying store reason is attached
    #[error("book creation failed: {0}")]
    CreationFailed(String),

    // ===== Storage/Infrastructure Errors =====

    /// Database schema migration failed
    #[error("database migration failed: {0}")]
    MigrationFailed(String),

    /// Bundled seed dataset could not be loaded or ingested
    #[error("catalog seed failed: {0}")]
    SeedFailed(String),

    /// Crate state is invalid for the requested operation
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Generic file I/O error with path context
    #[error("file I/O error: {0}")]
    FileIoError(String),

    // ===== External Library Errors =====
    // Automatic conversions from external error types

    /// Database driver error from sqlx
    #[error("database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

// Helper methods for creating common errors
impl CatalogError {
    /// Create a BookNotFound error from any id/title-ish value
    pub fn book_not_found<S: Into<String>>(book: S) -> Self {
        CatalogError::BookNotFound(book.into())
    }

    /// Create a RecordNotFound error with a resource name
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        CatalogError::RecordNotFound(resource.into())
    }

    /// Create an InvalidInput error with a message
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        CatalogError::InvalidInput(message.into())
    }

    /// Create an InvalidId error for a value that failed UUID parsing
    pub fn invalid_id<S: Into<String>>(value: S, reason: S) -> Self {
        CatalogError::InvalidId {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Check if error is caller-correctable input validation
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CatalogError::MissingRequiredFields { .. }
                | CatalogError::InvalidId { .. }
                | CatalogError::InvalidInput(_)
        )
    }

    /// Check if error is a missing-entity lookup failure
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::BookNotFound(_) | CatalogError::RecordNotFound(_)
        )
    }

    /// Get user-friendly error message suitable for display
    ///
    /// Validation and lookup errors are already phrased for end users;
    /// storage errors are summarized without driver internals.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::MissingRequiredFields { fields } => {
                format!(
                    "The request is missing required fields: {}.",
                    fields.join(", ")
                )
            }
            CatalogError::InvalidId { value, .. } => {
                format!("'{}' is not a valid id.", value)
            }
            CatalogError::BookNotFound(book) => {
                format!("No book matches '{}'.", book)
            }
            CatalogError::RankingFailed(_) => {
                "The trending list could not be computed. Please try again.".to_string()
            }
            CatalogError::SqlxError(_) | CatalogError::MigrationFailed(_) => {
                "A storage error occurred.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_category() {
        let err = CatalogError::MissingRequiredFields {
            fields: vec!["title".to_string(), "pages".to_string()],
        };
        assert!(err.is_validation());
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("title, pages"));
    }

    #[test]
    fn test_invalid_id_distinct_from_not_found() {
        let invalid = CatalogError::invalid_id("abc", "not a UUID");
        let missing = CatalogError::book_not_found("abc");
        assert!(invalid.is_validation());
        assert!(!invalid.is_not_found());
        assert!(missing.is_not_found());
        assert!(!missing.is_validation());
    }
}
