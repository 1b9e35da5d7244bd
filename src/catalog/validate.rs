// Bookhive - Social Book Catalog
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Request validation
//!
//! Id validation and create-payload validation both run before any query
//! is issued, so a malformed request never reaches the store and the
//! error names exactly what the caller must fix.

use crate::error::{CatalogError, Result};
use crate::storage::models::NewBook;
use serde::Deserialize;
use uuid::Uuid;

/// Validate an entity id: catalog ids are hyphenated UUID v4 text
///
/// A malformed id is a `InvalidId` validation error, deliberately
/// distinct from the `NotFound` a well-formed-but-absent id produces.
pub fn validate_entity_id(id: &str) -> Result<()> {
    Uuid::parse_str(id).map_err(|e| CatalogError::InvalidId {
        value: id.to_string(),
        reason: e.to_string(),
    })?;

    Ok(())
}

/// Incoming create-book payload, as deserialized by the routing layer
///
/// Every field is optional at the wire level; [`CreateBookRequest::validate`]
/// enforces which ones are actually required and reports all missing
/// fields at once.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    pub title: Option<String>,
    pub published_date: Option<String>,
    pub publisher: Option<String>,
    pub description: Option<String>,
    pub pages: Option<i64>,
    pub average_rating: Option<f32>,
    pub users_rating: Option<f32>,
    pub cover: Option<String>,
    pub identifier: Option<String>,
    pub author_name: Option<String>,
    pub genre_name: Option<String>,
}

/// A create request that passed validation
#[derive(Debug, Clone)]
pub struct ValidatedBook {
    pub book: NewBook,
    pub author_name: String,
    pub genre_name: String,
}

impl CreateBookRequest {
    /// Check required fields and produce the insertable record
    ///
    /// Required: title, publishedDate, publisher, description, pages,
    /// averageRating, authorName, genreName. Optional: usersRating,
    /// cover, identifier. Every missing field is reported in one error.
    pub fn validate(self) -> Result<ValidatedBook> {
        let mut missing = Vec::new();

        fn take<T: Default>(field: Option<T>, name: &str, missing: &mut Vec<String>) -> T {
            match field {
                Some(value) => value,
                None => {
                    missing.push(name.to_string());
                    T::default()
                }
            }
        }

        let title = take(self.title, "title", &mut missing);
        let published_date = take(self.published_date, "publishedDate", &mut missing);
        let publisher = take(self.publisher, "publisher", &mut missing);
        let description = take(self.description, "description", &mut missing);
        let pages = take(self.pages, "pages", &mut missing);
        let average_rating = take(self.average_rating, "averageRating", &mut missing);
        let author_name = take(self.author_name, "authorName", &mut missing);
        let genre_name = take(self.genre_name, "genreName", &mut missing);

        if !missing.is_empty() {
            return Err(CatalogError::MissingRequiredFields { fields: missing });
        }

        Ok(ValidatedBook {
            book: NewBook {
                title,
                published_date,
                publisher,
                description,
                pages,
                average_rating,
                users_rating: self.users_rating,
                cover: self.cover,
                identifier: self.identifier,
            },
            author_name,
            genre_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_request() -> CreateBookRequest {
        CreateBookRequest {
            title: Some("The Left Hand of Darkness".to_string()),
            published_date: Some("1969".to_string()),
            publisher: Some("Ace Books".to_string()),
            description: Some("An envoy on a glacial world.".to_string()),
            pages: Some(304),
            average_rating: Some(4.1),
            users_rating: None,
            cover: None,
            identifier: Some("ISBN:9780441478125".to_string()),
            author_name: Some("Ursula K. Le Guin".to_string()),
            genre_name: Some("Science Fiction".to_string()),
        }
    }

    #[test]
    fn test_valid_uuid_passes() {
        validate_entity_id("5a491c43-463a-4435-9fa6-bd85112525b3").expect("valid UUID rejected");
    }

    #[test]
    fn test_malformed_id_is_validation_error() {
        let err = validate_entity_id("not-a-uuid").expect_err("must fail");
        assert!(matches!(err, CatalogError::InvalidId { .. }));
        assert!(err.is_validation());
    }

    #[test]
    fn test_complete_request_validates() {
        let validated = complete_request().validate().expect("must validate");
        assert_eq!(validated.book.title, "The Left Hand of Darkness");
        assert_eq!(validated.author_name, "Ursula K. Le Guin");
        assert_eq!(validated.book.users_rating, None);
    }

    #[test]
    fn test_missing_fields_all_reported() {
        let request = CreateBookRequest {
            title: Some("Untitled".to_string()),
            ..Default::default()
        };

        let err = request.validate().expect_err("must fail");
        match err {
            CatalogError::MissingRequiredFields { fields } => {
                assert_eq!(
                    fields,
                    vec![
                        "publishedDate",
                        "publisher",
                        "description",
                        "pages",
                        "averageRating",
                        "authorName",
                        "genreName"
                    ]
                );
            }
            other => panic!("Expected MissingRequiredFields, got {other:?}"),
        }
    }

    #[test]
    fn test_optional_fields_stay_optional() {
        let mut request = complete_request();
        request.users_rating = None;
        request.cover = None;
        request.identifier = None;
        request.validate().expect("optional fields must not be required");
    }
}
