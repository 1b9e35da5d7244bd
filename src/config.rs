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


//! Catalog service configuration
//!
//! A small, embedding-friendly config struct. Host applications typically
//! deserialize this from their own config file; everything has a sensible
//! default so `CatalogConfig::default()` is enough for local use.

use serde::Deserialize;
use std::path::PathBuf;

/// Number of books returned by the trending list when not configured
pub const DEFAULT_TRENDING_LIMIT: usize = 10;

/// Configuration for [`crate::catalog::CatalogService`]
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to the SQLite database file. `None` resolves to the
    /// platform-specific application data directory.
    pub database_path: Option<PathBuf>,

    /// Maximum number of books in the trending list
    pub trending_limit: usize,

    /// Whether `bootstrap()` seeds the bundled dataset into an empty catalog
    pub seed_on_bootstrap: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            trending_limit: DEFAULT_TRENDING_LIMIT,
            seed_on_bootstrap: true,
        }
    }
}

impl CatalogConfig {
    /// Resolve the effective database path
    pub fn resolved_database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(default_database_path)
    }
}

/// Get default database path for the platform
///
/// - macOS: ~/Library/Application Support/Bookhive/catalog.db
/// - Linux: ~/.local/share/Bookhive/catalog.db
/// - Windows: %APPDATA%/Bookhive/catalog.db
pub fn default_database_path() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home)
            .join("Library")
            .join("Application Support")
            .join("Bookhive")
            .join("catalog.db")
    }

    #[cfg(target_os = "linux")]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("Bookhive")
            .join("catalog.db")
    }

    #[cfg(target_os = "windows")]
    {
        let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(appdata).join("Bookhive").join("catalog.db")
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        PathBuf::from("./catalog.db")
    }
}
