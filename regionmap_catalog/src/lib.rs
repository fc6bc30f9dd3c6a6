// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Regionmap Catalog: region records and text matching for interactive maps.
//!
//! - [`Region`] and [`RegionGroup`]: the records a map's shapes are bound to.
//! - [`Catalog`]: an ordered, validated, read-only list of regions (unique ids, unique
//!   normalized display names) with id/name/alias lookup, host search and list filtering.
//! - [`normalize`]: accent-, case- and separator-insensitive keys.
//! - [`LabelMatcher`]: resolves label text, including names split over two text runs.
//! - [`Catalog::colombia`]: the built-in catalog of Colombia's departments.
//!
//! ```
//! use regionmap_catalog::{Catalog, LabelMatcher, RegionGroup};
//!
//! let catalog = Catalog::colombia();
//! let matcher = LabelMatcher::new(&catalog);
//!
//! let region = matcher.resolve("ATLÁNTICO").unwrap();
//! assert_eq!(region.id, "atlantico");
//! assert_eq!(region.group, RegionGroup::Caribe);
//!
//! assert!(matcher.resolve("Mar Caribe").is_none());
//! assert_eq!(catalog.search_by_text("bogota").unwrap().display_name, "Bogotá D.C.");
//! ```

mod catalog;
mod data;
mod error;
mod matcher;
mod normalize;
mod region;

pub use catalog::Catalog;
pub use data::{SAN_ANDRES, colombia_regions};
pub use error::{CatalogError, CatalogResult};
pub use matcher::LabelMatcher;
pub use normalize::{SEPARATOR, normalize};
pub use region::{Region, RegionGroup};
