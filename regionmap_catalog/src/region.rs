// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region records.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Natural region a department belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionGroup {
    /// Caribbean coast.
    Caribe,
    /// Pacific coast.
    #[serde(rename = "Pacífica")]
    Pacifica,
    /// Andean highlands.
    Andina,
    /// Eastern plains.
    #[serde(rename = "Orinoquía")]
    Orinoquia,
    /// Amazon basin.
    #[serde(rename = "Amazonía")]
    Amazonia,
    /// Islands.
    Insular,
}

impl RegionGroup {
    /// Every group, in display order.
    pub const ALL: [Self; 6] = [
        Self::Caribe,
        Self::Pacifica,
        Self::Andina,
        Self::Orinoquia,
        Self::Amazonia,
        Self::Insular,
    ];

    /// Display name as shown to readers.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Caribe => "Caribe",
            Self::Pacifica => "Pacífica",
            Self::Andina => "Andina",
            Self::Orinoquia => "Orinoquía",
            Self::Amazonia => "Amazonía",
            Self::Insular => "Insular",
        }
    }

    /// Suggested classroom activities for departments of this group.
    pub const fn activities(self) -> &'static [&'static str] {
        match self {
            Self::Caribe => &[
                "Identifica tradiciones y ritmos del Caribe",
                "Ubica puertos y actividades económicas costeras",
            ],
            Self::Pacifica => &[
                "Explora biodiversidad y selvas húmedas",
                "Reconoce comunidades afrodescendientes y su cultura",
            ],
            Self::Andina => &[
                "Ubica cordilleras y pisos térmicos",
                "Analiza urbanización e industria en ciudades principales",
            ],
            Self::Orinoquia => &[
                "Describe llanos y ganadería",
                "Relaciona ríos y transporte fluvial",
            ],
            Self::Amazonia => &[
                "Investiga pueblos indígenas y conservación",
                "Reconoce el rol del bosque tropical",
            ],
            Self::Insular => &[
                "Ubica archipiélagos y actividades turísticas",
                "Analiza la protección de ecosistemas coralinos",
            ],
        }
    }
}

impl fmt::Display for RegionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One nameable division of the map.
///
/// This is also the record persisted as the last selection, so its serialized
/// form is part of the storage format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Stable slug, unique across the catalog.
    pub id: String,
    /// Human-readable name as it may appear in the source map.
    pub display_name: String,
    /// Capital city.
    pub capital: String,
    /// Natural region.
    pub group: RegionGroup,
    /// Approximate population, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
    /// Alternate spellings that also resolve to this region.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl Region {
    /// Create a region without population or aliases.
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        capital: impl Into<String>,
        group: RegionGroup,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            capital: capital.into(),
            group,
            population: None,
            aliases: Vec::new(),
        }
    }

    /// Set the approximate population.
    #[must_use]
    pub fn with_population(mut self, population: u64) -> Self {
        self.population = Some(population);
        self
    }

    /// Add an alternate spelling.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }
}
