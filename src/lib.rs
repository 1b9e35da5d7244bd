//! Bookhive catalog core
//!
//! A catalog service for books with per-user relational state (favorites,
//! read, currently-reading) and a derived trending ranking. This crate is
//! the core a routing layer embeds; it owns persistence, the engagement
//! edge sets, and the ranking, and exposes everything through
//! [`catalog::CatalogService`].
//!
//! # Layers
//! - [`storage`] - SQLite entity store: books, authors, genres, users,
//!   and the junction tables
//! - [`engagement`] - edge mutation, signal aggregation, trending
//! - [`catalog`] - validation, seeding, and the service facade
//!
//! # Quick start
//! ```no_run
//! use bookhive_core::catalog::CatalogService;
//! use bookhive_core::config::CatalogConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = CatalogService::open(CatalogConfig::default()).await?;
//! service.bootstrap().await?;
//!
//! for entry in service.trending().await? {
//!     println!("{:.1}  {}", entry.score, entry.book.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod engagement;
pub mod error;
pub mod storage;

pub use catalog::{CatalogService, CreateBookRequest, EngagementOp};
pub use config::CatalogConfig;
pub use error::{CatalogError, Result};
pub use storage::models::EngagementKind;
