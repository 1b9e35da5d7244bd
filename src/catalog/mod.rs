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


//! Catalog operations: validation, seeding, and the service facade
//!
//! [`CatalogService`] is the only type a routing layer needs; the
//! submodules behind it stay internal to the crate's callers.

pub mod seed;
pub mod service;
pub mod validate;

pub use service::{CatalogService, EngagementOp};
pub use validate::CreateBookRequest;
