// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordered, read-only region catalog.

use std::collections::HashSet;

use crate::error::{CatalogError, CatalogResult};
use crate::normalize::normalize;
use crate::region::{Region, RegionGroup};

/// Normalized lookup keys of one region, computed once at construction.
#[derive(Clone, Debug)]
struct RegionKeys {
    id: String,
    display_name: String,
    aliases: Vec<String>,
}

/// Ordered list of regions with unique ids and unique normalized display names.
///
/// The catalog is immutable once built; lookups return borrowed records.
#[derive(Clone, Debug)]
pub struct Catalog {
    regions: Vec<Region>,
    keys: Vec<RegionKeys>,
}

impl Catalog {
    /// Build a catalog, validating its invariants.
    ///
    /// ```
    /// use regionmap_catalog::{Catalog, CatalogError, Region, RegionGroup};
    ///
    /// let err = Catalog::new(vec![
    ///     Region::new("cauca", "Cauca", "Popayán", RegionGroup::Pacifica),
    ///     Region::new("cauca", "Cauca Sur", "Popayán", RegionGroup::Pacifica),
    /// ])
    /// .unwrap_err();
    /// assert_eq!(err, CatalogError::DuplicateId("cauca".into()));
    /// ```
    pub fn new(regions: Vec<Region>) -> CatalogResult<Self> {
        let mut ids = HashSet::new();
        let mut names: Vec<(String, &str)> = Vec::new();
        for region in &regions {
            if normalize(&region.id).is_empty() {
                return Err(CatalogError::EmptyId(region.id.clone()));
            }
            if !ids.insert(region.id.as_str()) {
                return Err(CatalogError::DuplicateId(region.id.clone()));
            }
            let key = normalize(&region.display_name);
            if let Some((_, first)) = names.iter().find(|(k, _)| *k == key) {
                return Err(CatalogError::DuplicateDisplayName {
                    first: (*first).to_owned(),
                    second: region.id.clone(),
                    key,
                });
            }
            names.push((key, region.id.as_str()));
        }
        Ok(Self::from_validated(regions))
    }

    pub(crate) fn from_validated(regions: Vec<Region>) -> Self {
        let keys = regions
            .iter()
            .map(|r| RegionKeys {
                id: normalize(&r.id),
                display_name: normalize(&r.display_name),
                aliases: r
                    .aliases
                    .iter()
                    .map(|a| normalize(a))
                    .filter(|a| !a.is_empty())
                    .collect(),
            })
            .collect();
        Self { regions, keys }
    }

    /// All regions in catalog order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the catalog has no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Look up a region by its exact id.
    pub fn get(&self, id: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    /// Resolve an already-normalized key: ids first, then display names, then aliases.
    pub fn find_normalized(&self, key: &str) -> Option<&Region> {
        if key.is_empty() {
            return None;
        }
        let pos = self
            .keys
            .iter()
            .position(|k| k.id == key)
            .or_else(|| self.keys.iter().position(|k| k.display_name == key))
            .or_else(|| {
                self.keys
                    .iter()
                    .position(|k| k.aliases.iter().any(|a| a == key))
            })?;
        Some(&self.regions[pos])
    }

    /// Host search: exact id or display-name match after normalization.
    ///
    /// Aliases are deliberately not consulted; they exist to decode map text.
    pub fn search_by_text(&self, query: &str) -> Option<&Region> {
        let key = normalize(query);
        if key.is_empty() {
            return None;
        }
        let pos = self
            .keys
            .iter()
            .position(|k| k.display_name == key || k.id == key)?;
        Some(&self.regions[pos])
    }

    /// Regions for the list view: optionally restricted to a group, and to
    /// display names containing `text` (case-insensitive). Catalog order is kept.
    pub fn filter(&self, group: Option<RegionGroup>, text: &str) -> Vec<&Region> {
        let needle = text.trim().to_lowercase();
        self.regions
            .iter()
            .filter(|r| group.is_none_or(|g| r.group == g))
            .filter(|r| needle.is_empty() || r.display_name.to_lowercase().contains(&needle))
            .collect()
    }
}
