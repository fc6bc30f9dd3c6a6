// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning for binding and selection.
//!
//! Every constant below was tuned against the Colombia department map. The
//! defaults reproduce that tuning; a TOML document can override any subset of
//! it, and omitted sections keep their defaults:
//!
//! ```
//! use regionmap_binder::MapConfig;
//!
//! let config = MapConfig::from_toml_str(
//!     r#"
//!     [candidate]
//!     min_area = 200.0
//!
//!     [enclave]
//!     padding = 80.0
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.candidate.min_area, 200.0);
//! assert_eq!(config.candidate.min_dimension, 5.0);
//! assert_eq!(config.enclave.region.as_deref(), Some("san_andres"));
//! assert_eq!(config.binding.threshold("meta", 200.0), 40.0);
//! ```

use std::fs;
use std::path::Path;

use kurbo::Rect;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// All tunables of the binder and the selection controller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Which shapes are worth binding at all.
    pub candidate: CandidateFilter,
    /// Exclusion zone around a detached region drawn as an inset.
    pub enclave: EnclaveRule,
    /// Nearest-label thresholds used while binding.
    pub binding: ThresholdTable,
    /// Thresholds used when a click has to fall back to live geometry.
    pub selection: SelectionTuning,
    /// Small regions drawn inside a large surrounding one.
    pub enclosures: Vec<EnclosurePair>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            candidate: CandidateFilter::default(),
            enclave: EnclaveRule::default(),
            binding: ThresholdTable::binding(),
            selection: SelectionTuning::default(),
            enclosures: vec![EnclosurePair::default()],
        }
    }
}

impl MapConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// The enclosure pair `region` takes part in, if any.
    pub fn enclosure_for(&self, region: &str) -> Option<&EnclosurePair> {
        self.enclosures
            .iter()
            .find(|p| p.inner == region || p.outer == region)
    }

    /// Whether a shape of `area` may stand for `region` at all.
    pub fn area_admits(&self, region: &str, area: f64) -> bool {
        self.enclosures.iter().all(|p| p.area_admits(region, area))
    }

    /// Check ranges the type system cannot express.
    pub fn validate(&self) -> ConfigResult<()> {
        non_negative("candidate.min_dimension", self.candidate.min_dimension)?;
        non_negative("candidate.min_area", self.candidate.min_area)?;
        non_negative("enclave.padding", self.enclave.padding)?;
        self.binding.validate("binding")?;
        self.selection.relaxed.validate("selection.relaxed")?;
        non_negative("selection.last_resort.floor", self.selection.last_resort.floor)?;
        positive("selection.last_resort.factor", self.selection.last_resort.factor)?;
        for (i, pair) in self.enclosures.iter().enumerate() {
            if pair.inner == pair.outer {
                return Err(ConfigError::Invalid {
                    field: format!("enclosures[{i}]"),
                    reason: format!("inner and outer are both {:?}", pair.inner),
                });
            }
            non_negative(&format!("enclosures[{i}].inner_max_area"), pair.inner_max_area)?;
            non_negative(
                &format!("enclosures[{i}].inner_max_distance"),
                pair.inner_max_distance,
            )?;
            non_negative(&format!("enclosures[{i}].outer_min_area"), pair.outer_min_area)?;
            non_negative(
                &format!("enclosures[{i}].outer_min_distance"),
                pair.outer_min_distance,
            )?;
        }
        Ok(())
    }
}

fn non_negative(field: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field: field.to_owned(),
            reason: format!("expected a finite value >= 0, got {value}"),
        })
    }
}

fn positive(field: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field: field.to_owned(),
            reason: format!("expected a finite value > 0, got {value}"),
        })
    }
}

/// Minimum size and fill for a shape to be considered for binding.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateFilter {
    /// Smallest admissible `min(width, height)`.
    pub min_dimension: f64,
    /// Smallest admissible `width * height`.
    pub min_area: f64,
}

impl Default for CandidateFilter {
    fn default() -> Self {
        Self {
            min_dimension: 5.0,
            min_area: 120.0,
        }
    }
}

impl CandidateFilter {
    /// Whether a shape with these properties is a binding candidate.
    pub fn admits(&self, filled: bool, bounds: Rect) -> bool {
        let min_dim = bounds.width().min(bounds.height());
        filled && min_dim >= self.min_dimension && bounds.area() >= self.min_area
    }
}

/// A region drawn detached from the mainland (an inset), whose neighbourhood
/// must not pull in mainland labels or shapes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnclaveRule {
    /// Region id of the inset; `None` disables the exclusion.
    pub region: Option<String>,
    /// Padding added on every side of the inset's label bounds.
    pub padding: f64,
}

impl Default for EnclaveRule {
    fn default() -> Self {
        Self {
            region: Some(regionmap_catalog::SAN_ANDRES.to_owned()),
            padding: 60.0,
        }
    }
}

/// `min(cap, max_dimension * factor)`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProximityRule {
    /// Absolute upper bound on the accepted distance.
    pub cap: f64,
    /// Fraction of the shape's larger side.
    pub factor: f64,
}

impl ProximityRule {
    /// Accepted label distance for a shape whose larger side is `max_dimension`.
    pub fn limit(&self, max_dimension: f64) -> f64 {
        self.cap.min(max_dimension * self.factor)
    }
}

/// A [`ProximityRule`] that applies to a named set of regions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProximityTier {
    /// Name used in log events.
    pub name: String,
    /// Absolute upper bound on the accepted distance.
    pub cap: f64,
    /// Fraction of the shape's larger side.
    pub factor: f64,
    /// Region ids this tier applies to.
    pub regions: Vec<String>,
}

impl ProximityTier {
    fn new(name: &str, cap: f64, factor: f64, regions: &[&str]) -> Self {
        Self {
            name: name.to_owned(),
            cap,
            factor,
            regions: regions.iter().map(|r| (*r).to_owned()).collect(),
        }
    }

    /// The rule of this tier.
    pub fn rule(&self) -> ProximityRule {
        ProximityRule {
            cap: self.cap,
            factor: self.factor,
        }
    }
}

/// Distance thresholds: a default rule and tiers for crowded regions.
///
/// Tiers are checked in order and the first one listing a region wins, so
/// narrower sets go first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    /// Rule for regions not listed in any tier.
    pub default: ProximityRule,
    /// Region-specific overrides.
    #[serde(default)]
    pub tiers: Vec<ProximityTier>,
}

/// Coastal departments whose small shapes crowd each other's labels.
const HARD_LIMIT: [&str; 5] = ["magdalena", "atlantico", "bolivar", "cordoba", "sucre"];
const EXTRA_TIGHT: [&str; 2] = ["atlantico", "sucre"];

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::binding()
    }
}

impl ThresholdTable {
    /// Thresholds applied while binding.
    pub fn binding() -> Self {
        Self {
            default: ProximityRule {
                cap: 40.0,
                factor: 0.5,
            },
            tiers: vec![
                ProximityTier::new("extra_tight", 18.0, 0.25, &EXTRA_TIGHT),
                ProximityTier::new("hard_limit", 30.0, 0.4, &HARD_LIMIT),
            ],
        }
    }

    /// Looser thresholds for the click-time fallback.
    pub fn relaxed() -> Self {
        Self {
            default: ProximityRule {
                cap: 40.0,
                factor: 0.5,
            },
            tiers: vec![
                ProximityTier::new("extra", 50.0, 0.55, &EXTRA_TIGHT),
                ProximityTier::new("hard_limit", 34.0, 0.45, &HARD_LIMIT),
            ],
        }
    }

    /// The rule that governs `region`.
    pub fn rule_for(&self, region: &str) -> ProximityRule {
        self.tiers
            .iter()
            .find(|t| t.regions.iter().any(|r| r == region))
            .map_or(self.default, ProximityTier::rule)
    }

    /// Accepted label distance for `region` on a shape whose larger side is
    /// `max_dimension`.
    pub fn threshold(&self, region: &str, max_dimension: f64) -> f64 {
        self.rule_for(region).limit(max_dimension)
    }

    fn validate(&self, prefix: &str) -> ConfigResult<()> {
        non_negative(&format!("{prefix}.default.cap"), self.default.cap)?;
        positive(&format!("{prefix}.default.factor"), self.default.factor)?;
        for tier in &self.tiers {
            non_negative(&format!("{prefix}.tiers.{}.cap", tier.name), tier.cap)?;
            positive(&format!("{prefix}.tiers.{}.factor", tier.name), tier.factor)?;
        }
        Ok(())
    }
}

/// `max(floor, max_dimension * factor)`: how far a click may reach when
/// nothing else matched.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LastResort {
    /// Distance always accepted.
    pub floor: f64,
    /// Fraction of the shape's larger side.
    pub factor: f64,
}

impl Default for LastResort {
    fn default() -> Self {
        Self {
            floor: 60.0,
            factor: 0.8,
        }
    }
}

impl LastResort {
    /// Accepted distance for a shape whose larger side is `max_dimension`.
    pub fn limit(&self, max_dimension: f64) -> f64 {
        self.floor.max(max_dimension * self.factor)
    }
}

/// Click-time fallback tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionTuning {
    /// Second, looser nearest-label pass.
    pub relaxed: ThresholdTable,
    /// Final pass.
    pub last_resort: LastResort,
}

impl Default for SelectionTuning {
    fn default() -> Self {
        Self {
            relaxed: ThresholdTable::relaxed(),
            last_resort: LastResort::default(),
        }
    }
}

/// Which side of an [`EnclosurePair`] a region is on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EnclosureRole {
    /// The small, enclosed region.
    Inner,
    /// The large, surrounding region.
    Outer,
}

/// A small region drawn inside a large one (a capital district inside its
/// department). Their shapes overlap, so label hit tests alone cannot tell
/// them apart; area and distance to the clicked label can.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnclosurePair {
    /// Id of the enclosed region.
    pub inner: String,
    /// Id of the surrounding region.
    pub outer: String,
    /// Largest shape area that may stand for `inner`.
    pub inner_max_area: f64,
    /// Farthest an `inner` shape may be from its clicked label.
    pub inner_max_distance: f64,
    /// Smallest shape area that may stand for `outer`.
    pub outer_min_area: f64,
    /// Closest an `outer` shape may be to its clicked label.
    pub outer_min_distance: f64,
}

impl Default for EnclosurePair {
    fn default() -> Self {
        Self {
            inner: "bogota".to_owned(),
            outer: "cundinamarca".to_owned(),
            inner_max_area: 9000.0,
            inner_max_distance: 120.0,
            outer_min_area: 20000.0,
            outer_min_distance: 60.0,
        }
    }
}

impl EnclosurePair {
    /// The role of `region` in this pair.
    pub fn role(&self, region: &str) -> Option<EnclosureRole> {
        if region == self.inner {
            Some(EnclosureRole::Inner)
        } else if region == self.outer {
            Some(EnclosureRole::Outer)
        } else {
            None
        }
    }

    /// Area eligibility; regions outside the pair are always admitted.
    pub fn area_admits(&self, region: &str, area: f64) -> bool {
        match self.role(region) {
            Some(EnclosureRole::Inner) => area <= self.inner_max_area,
            Some(EnclosureRole::Outer) => area >= self.outer_min_area,
            None => true,
        }
    }

    /// Distance condition relative to the clicked label.
    pub fn distance_admits(&self, region: &str, distance: f64) -> bool {
        match self.role(region) {
            Some(EnclosureRole::Inner) => distance <= self.inner_max_distance,
            Some(EnclosureRole::Outer) => distance >= self.outer_min_distance,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds_follow_the_tiers() {
        let t = ThresholdTable::binding();
        assert_eq!(t.threshold("meta", 200.0), 40.0);
        assert_eq!(t.threshold("meta", 60.0), 30.0);
        assert_eq!(t.threshold("magdalena", 200.0), 30.0);
        assert_eq!(t.threshold("atlantico", 200.0), 18.0);
        assert_eq!(t.threshold("sucre", 40.0), 10.0);
    }

    #[test]
    fn relaxed_thresholds_are_looser_for_crowded_regions() {
        let binding = ThresholdTable::binding();
        let relaxed = ThresholdTable::relaxed();
        for region in HARD_LIMIT {
            assert!(
                relaxed.threshold(region, 120.0) > binding.threshold(region, 120.0),
                "{region} should relax"
            );
        }
        assert_eq!(LastResort::default().limit(50.0), 60.0);
        assert_eq!(LastResort::default().limit(100.0), 80.0);
    }

    #[test]
    fn candidate_filter_checks_fill_and_size() {
        let f = CandidateFilter::default();
        assert!(f.admits(true, Rect::new(0.0, 0.0, 20.0, 6.0)));
        assert!(!f.admits(false, Rect::new(0.0, 0.0, 20.0, 6.0)));
        assert!(!f.admits(true, Rect::new(0.0, 0.0, 100.0, 4.9)));
        assert!(!f.admits(true, Rect::new(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn enclosure_pair_rules() {
        let pair = EnclosurePair::default();
        assert!(pair.area_admits("bogota", 9000.0));
        assert!(!pair.area_admits("bogota", 9000.5));
        assert!(pair.area_admits("cundinamarca", 20000.0));
        assert!(!pair.area_admits("cundinamarca", 5000.0));
        assert!(pair.area_admits("meta", 1.0));
        assert!(pair.distance_admits("bogota", 120.0));
        assert!(!pair.distance_admits("cundinamarca", 59.0));
        assert_eq!(pair.role("meta"), None);
    }

    #[test]
    fn tiers_can_be_replaced_from_toml() {
        let config = MapConfig::from_toml_str(
            r#"
            enclosures = []

            [binding.default]
            cap = 25.0
            factor = 0.3

            [[binding.tiers]]
            name = "islands"
            cap = 5.0
            factor = 0.1
            regions = ["san_andres"]
            "#,
        )
        .unwrap();
        assert_eq!(config.binding.threshold("meta", 200.0), 25.0);
        assert_eq!(config.binding.threshold("san_andres", 200.0), 5.0);
        assert_eq!(config.binding.threshold("atlantico", 200.0), 25.0);
        assert!(config.enclosures.is_empty());
        assert!(config.area_admits("bogota", 1.0e6));
        // Untouched sections keep the tuned defaults.
        assert_eq!(config.selection, SelectionTuning::default());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = MapConfig::from_toml_str("[candidate]\nmin_area = -1.0\n").unwrap_err();
        assert!(
            matches!(err, ConfigError::Invalid { ref field, .. } if field == "candidate.min_area"),
            "unexpected error: {err}"
        );
        let err = MapConfig::from_toml_str("[candidate]\nmin_area = \"big\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "unexpected error: {err}");
    }

    #[test]
    fn load_reads_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.toml");
        fs::write(&path, "[enclave]\nregion = \"providencia\"\n").unwrap();
        let config = MapConfig::load(&path).unwrap();
        assert_eq!(config.enclave.region.as_deref(), Some("providencia"));
        assert_eq!(config.enclave.padding, 60.0);

        let missing = MapConfig::load(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }), "unexpected error: {missing}");
    }
}
