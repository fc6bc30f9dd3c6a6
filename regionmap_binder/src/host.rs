// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notifications to the embedding application.

use regionmap_catalog::{Region, RegionGroup};

/// What the host learns about a new selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionInfo {
    /// Region id.
    pub id: String,
    /// Display name.
    pub display_name: String,
    /// Capital city.
    pub capital: String,
    /// Natural region.
    pub group: RegionGroup,
    /// Approximate population, when known.
    pub population: Option<u64>,
}

impl From<&Region> for SelectionInfo {
    fn from(region: &Region) -> Self {
        Self {
            id: region.id.clone(),
            display_name: region.display_name.clone(),
            capital: region.capital.clone(),
            group: region.group,
            population: region.population,
        }
    }
}

/// Receives selection changes.
pub trait SelectionHost {
    /// A region became the selection.
    fn region_selected(&mut self, info: &SelectionInfo);

    /// The selection was cleared.
    fn selection_cleared(&mut self) {}
}

/// A host that ignores every notification.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoHost;

impl SelectionHost for NoHost {
    fn region_selected(&mut self, _info: &SelectionInfo) {}
}

impl<H: SelectionHost + ?Sized> SelectionHost for &mut H {
    fn region_selected(&mut self, info: &SelectionInfo) {
        (**self).region_selected(info);
    }

    fn selection_cleared(&mut self) {
        (**self).selection_cleared();
    }
}
