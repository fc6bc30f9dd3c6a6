// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Choosing the one shape to highlight for a selected region.
//!
//! The binding computed at load time is trusted first. When it has nothing for
//! the region, the live geometry around the clicked label is consulted with
//! progressively looser rules. Each [`TargetStage`] yields at most one shape
//! and the first that yields wins.
//!
//! Only shapes passing the candidate filter and the enclosure area rules for
//! the region are considered. The live stages additionally skip shapes already
//! bound to a different region.

use kurbo::Point;
use regionmap_catalog::{Region, normalize};
use tracing::trace;

use crate::binder::nearest;
use crate::config::{EnclosureRole, MapConfig};
use crate::geometry::GeometrySource;
use crate::model::{MapScene, Shape, ShapeIdx};

/// Strategies for locating a region's shape, in evaluation order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TargetStage {
    /// A shape bound to the region.
    ExactAssignment,
    /// A shape whose element id is the region's id or name.
    ElementName,
    /// A shape whose fill contains the clicked label.
    LiveHitTest,
    /// The nearest shape, within binding thresholds.
    LiveNearest,
    /// The nearest shape, within relaxed thresholds.
    RelaxedNearest,
    /// The nearest shape, within the last-resort reach.
    LastResort,
}

impl TargetStage {
    /// Evaluation order.
    pub const ORDER: [Self; 6] = [
        Self::ExactAssignment,
        Self::ElementName,
        Self::LiveHitTest,
        Self::LiveNearest,
        Self::RelaxedNearest,
        Self::LastResort,
    ];

    /// Name used in log events.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExactAssignment => "exact_assignment",
            Self::ElementName => "element_name",
            Self::LiveHitTest => "live_hit_test",
            Self::LiveNearest => "live_nearest",
            Self::RelaxedNearest => "relaxed_nearest",
            Self::LastResort => "last_resort",
        }
    }
}

/// The shape chosen for a selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Target {
    /// Shape to highlight.
    pub shape: ShapeIdx,
    /// Stage that found it.
    pub stage: TargetStage,
}

pub(crate) struct TargetResolver<'a, G: GeometrySource> {
    scene: &'a MapScene<G>,
    config: &'a MapConfig,
    region: &'a Region,
    anchor: Option<Point>,
    pool: Vec<ShapeIdx>,
}

impl<'a, G: GeometrySource> TargetResolver<'a, G> {
    /// `anchor` is the clicked label's center; queries without a label have none.
    pub(crate) fn new(
        scene: &'a MapScene<G>,
        config: &'a MapConfig,
        region: &'a Region,
        anchor: Option<Point>,
    ) -> Self {
        let pool = scene
            .shapes()
            .iter()
            .enumerate()
            .filter(|(_, s)| {
                config.candidate.admits(s.is_filled(), s.bounds())
                    && config.area_admits(&region.id, s.area())
            })
            .map(|(i, _)| ShapeIdx(i))
            .collect();
        Self {
            scene,
            config,
            region,
            anchor,
            pool,
        }
    }

    pub(crate) fn resolve(&self) -> Option<Target> {
        let (shape, stage) = TargetStage::ORDER
            .into_iter()
            .find_map(|stage| self.run(stage).map(|shape| (shape, stage)))?;
        let shape = self.group_child(shape);
        trace!(region = %self.region.id, shape = shape.0, stage = stage.as_str(), "target found");
        Some(Target { shape, stage })
    }

    fn shape(&self, idx: ShapeIdx) -> &'a Shape<G::ElementId> {
        &self.scene.shapes()[idx.0]
    }

    fn run(&self, stage: TargetStage) -> Option<ShapeIdx> {
        let id = self.region.id.as_str();
        match stage {
            TargetStage::ExactAssignment => {
                let set = self.pool_where(|s| s.assigned_region() == Some(id));
                self.reduce(self.narrow(set))
            }
            TargetStage::ElementName => {
                let by_id = normalize(id);
                let by_name = normalize(&self.region.display_name);
                let set = self.pool_where(|s| {
                    s.name().is_some_and(|n| {
                        let key = normalize(n);
                        key == by_id || key == by_name
                    })
                });
                self.reduce(self.narrow(set))
            }
            TargetStage::LiveHitTest => {
                let anchor = self.anchor?;
                let containment = self.scene.source().point_containment()?;
                let set = self.pool_where(|s| {
                    self.is_free(s) && containment.contains_point(s.element(), anchor)
                });
                self.reduce(set)
            }
            TargetStage::LiveNearest => {
                self.nearest_within(|s| self.config.binding.threshold(id, s.max_dimension()))
            }
            TargetStage::RelaxedNearest => self.nearest_within(|s| {
                self.config
                    .selection
                    .relaxed
                    .threshold(id, s.max_dimension())
            }),
            TargetStage::LastResort => {
                self.nearest_within(|s| self.config.selection.last_resort.limit(s.max_dimension()))
            }
        }
    }

    fn pool_where(&self, pred: impl Fn(&Shape<G::ElementId>) -> bool) -> Vec<ShapeIdx> {
        self.pool
            .iter()
            .copied()
            .filter(|&i| pred(self.shape(i)))
            .collect()
    }

    /// Unbound, or bound to the region being selected.
    fn is_free(&self, shape: &Shape<G::ElementId>) -> bool {
        shape
            .assigned_region()
            .is_none_or(|r| r == self.region.id)
    }

    fn nearest_within(&self, limit: impl Fn(&Shape<G::ElementId>) -> f64) -> Option<ShapeIdx> {
        let anchor = self.anchor?;
        let free = self.pool_where(|s| self.is_free(s));
        let (idx, distance) = nearest(anchor, free.into_iter().map(|i| (i, self.shape(i).center())))?;
        let limit = limit(self.shape(idx));
        (distance <= limit).then_some(idx)
    }

    /// Separate the enclosed region from its surroundings. Keeps the input
    /// unchanged when no shape passes.
    fn narrow(&self, set: Vec<ShapeIdx>) -> Vec<ShapeIdx> {
        let id = self.region.id.as_str();
        let Some(pair) = self.config.enclosure_for(id) else {
            return set;
        };
        let inner_key = normalize(&pair.inner);
        let hints_inner = |s: &Shape<G::ElementId>| {
            s.assigned_region() == Some(pair.inner.as_str())
                || s.name().is_some_and(|n| normalize(n).contains(&inner_key))
        };
        let kept: Vec<ShapeIdx> = set
            .iter()
            .copied()
            .filter(|&i| {
                let s = self.shape(i);
                let identity = match pair.role(id) {
                    Some(EnclosureRole::Inner) => hints_inner(s),
                    Some(EnclosureRole::Outer) => !hints_inner(s),
                    None => true,
                };
                identity
                    && pair.area_admits(id, s.area())
                    && self
                        .anchor
                        .is_none_or(|a| pair.distance_admits(id, a.distance(s.center())))
            })
            .collect();
        if kept.is_empty() { set } else { kept }
    }

    /// One shape out of many: exact assignments first, then nearest to the
    /// label, then document order.
    ///
    /// An enclosed region bound to several pieces takes its smallest piece.
    fn reduce(&self, set: Vec<ShapeIdx>) -> Option<ShapeIdx> {
        if set.len() <= 1 {
            return set.first().copied();
        }
        let id = self.region.id.as_str();
        let exact: Vec<ShapeIdx> = set
            .iter()
            .copied()
            .filter(|&i| self.shape(i).assigned_region() == Some(id))
            .collect();
        let inner = self
            .config
            .enclosure_for(id)
            .and_then(|pair| pair.role(id))
            == Some(EnclosureRole::Inner);
        if inner && !exact.is_empty() {
            return exact
                .into_iter()
                .min_by(|&a, &b| self.shape(a).area().total_cmp(&self.shape(b).area()));
        }
        let set = if exact.is_empty() { set } else { exact };
        match self.anchor {
            Some(anchor) => nearest(anchor, set.into_iter().map(|i| (i, self.shape(i).center())))
                .map(|(i, _)| i),
            None => set.first().copied(),
        }
    }

    /// When the chosen shape belongs to a group, highlight the group member
    /// closest to the label instead of the whole group.
    fn group_child(&self, chosen: ShapeIdx) -> ShapeIdx {
        let (Some(anchor), Some(group)) = (self.anchor, self.shape(chosen).group()) else {
            return chosen;
        };
        let members = self.pool_where(|s| s.group() == Some(group) && self.is_free(s));
        nearest(anchor, members.into_iter().map(|i| (i, self.shape(i).center())))
            .map_or(chosen, |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Binder;
    use crate::testing::{FixtureMap, catalog};
    use regionmap_catalog::{Catalog, LabelMatcher};

    fn resolve(
        map: FixtureMap,
        cat: &Catalog,
        region: &str,
        anchor: Option<Point>,
    ) -> Option<Target> {
        let config = MapConfig::default();
        let mut scene = MapScene::load(map, &LabelMatcher::new(cat));
        Binder::new(&config).bind_all(&mut scene);
        let region = cat.get(region).unwrap();
        TargetResolver::new(&scene, &config, region, anchor).resolve()
    }

    #[test]
    fn exact_assignment_comes_first() {
        let cat = catalog();
        let mut map = FixtureMap::new();
        let named = map.shape_at(Point::new(0.0, 0.0), 50.0, 50.0);
        map.set_name(named, "Meta");
        let hinted = map.shape_at(Point::new(300.0, 0.0), 50.0, 50.0);
        map.set_hint(hinted, "meta");
        let t = resolve(map, &cat, "meta", Some(Point::ORIGIN)).unwrap();
        assert_eq!(t, Target { shape: ShapeIdx(1), stage: TargetStage::ExactAssignment });
    }

    #[test]
    fn enclosed_region_takes_its_smallest_bound_piece() {
        let cat = catalog();
        let mut map = FixtureMap::new();
        let large = map.shape_at(Point::new(10.0, 0.0), 80.0, 80.0);
        map.set_hint(large, "bogota");
        let small = map.shape_at(Point::new(100.0, 0.0), 30.0, 30.0);
        map.set_hint(small, "bogota");
        let t = resolve(map, &cat, "bogota", Some(Point::ORIGIN)).unwrap();
        assert_eq!(t, Target { shape: ShapeIdx(1), stage: TargetStage::ExactAssignment });

        // Regions outside an enclosure pair still take the nearest piece.
        let mut map = FixtureMap::new();
        let near = map.shape_at(Point::new(10.0, 0.0), 80.0, 80.0);
        map.set_hint(near, "meta");
        let far = map.shape_at(Point::new(100.0, 0.0), 30.0, 30.0);
        map.set_hint(far, "meta");
        let t = resolve(map, &cat, "meta", Some(Point::ORIGIN)).unwrap();
        assert_eq!(t.shape, ShapeIdx(0));
    }

    #[test]
    fn element_name_matches_id_or_display_name() {
        let cat = catalog();
        let mut map = FixtureMap::new();
        let a = map.shape_at(Point::new(0.0, 0.0), 50.0, 50.0);
        map.set_name(a, "norte_de_santander_x");
        let b = map.shape_at(Point::new(300.0, 0.0), 50.0, 50.0);
        map.set_name(b, "Norte de Santander");
        let t = resolve(map, &cat, "norte_santander", None).unwrap();
        assert_eq!(t, Target { shape: ShapeIdx(1), stage: TargetStage::ElementName });
    }

    #[test]
    fn multiple_matches_reduce_to_nearest() {
        let cat = catalog();
        let mut map = FixtureMap::new();
        for x in [0.0, 100.0, 200.0] {
            let s = map.shape_at(Point::new(x, 0.0), 50.0, 50.0);
            map.set_hint(s, "huila");
        }
        let t = resolve(map.clone(), &cat, "huila", Some(Point::new(190.0, 0.0))).unwrap();
        assert_eq!(t.shape, ShapeIdx(2));
        // Without a label, document order decides.
        let t = resolve(map, &cat, "huila", None).unwrap();
        assert_eq!(t.shape, ShapeIdx(0));
    }

    #[test]
    fn live_stages_skip_shapes_of_other_regions() {
        let cat = catalog();
        let mut map = FixtureMap::new().with_hit_testing();
        let taken = map.shape_at(Point::new(0.0, 0.0), 100.0, 100.0);
        map.set_hint(taken, "tolima");
        map.shape_at(Point::new(0.0, 80.0), 100.0, 100.0);
        // The label sits inside the tolima shape, 70 away from the free one.
        let t = resolve(map, &cat, "caldas", Some(Point::new(0.0, 10.0))).unwrap();
        assert_eq!(t, Target { shape: ShapeIdx(1), stage: TargetStage::LastResort });
    }

    #[test]
    fn live_fallbacks_loosen_step_by_step() {
        let cat = catalog();
        // 100 x 100 shape: binding 40, relaxed 40, last resort 80.
        let cases = [
            (35.0, Some(TargetStage::LiveNearest)),
            (70.0, Some(TargetStage::LastResort)),
            (90.0, None),
        ];
        for (offset, expected) in cases {
            let mut map = FixtureMap::new();
            map.shape_at(Point::new(0.0, 0.0), 100.0, 100.0);
            let t = resolve(map, &cat, "caldas", Some(Point::new(offset, 0.0)));
            assert_eq!(t.map(|t| t.stage), expected, "offset {offset}");
        }
    }

    #[test]
    fn relaxed_thresholds_help_crowded_regions() {
        let cat = catalog();
        // 200 x 200 sucre shape: binding 18, relaxed 50.
        let mut map = FixtureMap::new();
        map.shape_at(Point::new(0.0, 0.0), 200.0, 200.0);
        let t = resolve(map, &cat, "sucre", Some(Point::new(30.0, 0.0))).unwrap();
        assert_eq!(t.stage, TargetStage::RelaxedNearest);
    }

    #[test]
    fn live_hit_test_uses_the_anchor() {
        let cat = catalog();
        let mut map = FixtureMap::new().with_hit_testing();
        map.shape_at(Point::new(0.0, 0.0), 400.0, 400.0);
        map.shape_at(Point::new(150.0, 150.0), 60.0, 60.0);
        let t = resolve(map, &cat, "caldas", Some(Point::new(-150.0, -150.0))).unwrap();
        assert_eq!(t, Target { shape: ShapeIdx(0), stage: TargetStage::LiveHitTest });
    }

    #[test]
    fn group_child_nearest_to_label_is_chosen() {
        let cat = catalog();
        let mut map = FixtureMap::new();
        let a = map.shape_at(Point::new(0.0, 0.0), 50.0, 50.0);
        let b = map.shape_at(Point::new(100.0, 0.0), 50.0, 50.0);
        map.set_group(a, 7);
        map.set_group(b, 7);
        map.set_hint(a, "boyaca");
        let t = resolve(map, &cat, "boyaca", Some(Point::new(95.0, 0.0))).unwrap();
        assert_eq!(t.stage, TargetStage::ExactAssignment);
        assert_eq!(t.shape, ShapeIdx(1));
    }
}
