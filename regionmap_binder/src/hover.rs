// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover tracking: enter/leave transitions as the pointer crosses shapes.
//!
//! Hover is independent of selection. A hovered shape keeps its selection
//! highlight and vice versa. Shapes centered inside the enclave rectangle
//! never hover, matching the binder's exclusion.
//!
//! ```
//! use regionmap_binder::hover::{HoverEvent, HoverTracker};
//! use regionmap_binder::ShapeIdx;
//!
//! let mut hover = HoverTracker::new();
//! assert_eq!(hover.retarget(Some(ShapeIdx(2))), vec![HoverEvent::Enter(ShapeIdx(2))]);
//! assert_eq!(
//!     hover.retarget(Some(ShapeIdx(5))),
//!     vec![HoverEvent::Leave(ShapeIdx(2)), HoverEvent::Enter(ShapeIdx(5))]
//! );
//! assert_eq!(hover.retarget(Some(ShapeIdx(5))), vec![]);
//! ```

use kurbo::Point;
use tracing::trace;

use crate::geometry::GeometrySource;
use crate::model::{MapScene, ShapeIdx};

/// A hover transition. A `Leave` always precedes the `Enter` of the same move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent {
    /// The pointer entered the shape.
    Enter(ShapeIdx),
    /// The pointer left the shape.
    Leave(ShapeIdx),
}

/// Tracks the single shape under the pointer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverTracker {
    current: Option<ShapeIdx>,
}

impl HoverTracker {
    /// Create a tracker with nothing hovered.
    pub fn new() -> Self {
        Self::default()
    }

    /// The hovered shape, if any.
    pub fn current(&self) -> Option<ShapeIdx> {
        self.current
    }

    /// Move the hover to `target`, returning the transitions.
    pub fn retarget(&mut self, target: Option<ShapeIdx>) -> Vec<HoverEvent> {
        if target == self.current {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(2);
        if let Some(old) = self.current {
            out.push(HoverEvent::Leave(old));
        }
        if let Some(new) = target {
            out.push(HoverEvent::Enter(new));
        }
        self.current = target;
        out
    }

    /// Hit-test `point` against `scene`, update hover flags on its shapes and
    /// return the transitions.
    pub fn pointer_moved<G: GeometrySource>(
        &mut self,
        scene: &mut MapScene<G>,
        point: Point,
    ) -> Vec<HoverEvent> {
        let target = scene.shape_at(point).filter(|&idx| {
            scene
                .shape(idx)
                .is_some_and(|s| !scene.in_enclave(s.center()))
        });
        let events = self.retarget(target);
        apply(scene, &events);
        events
    }

    /// The pointer left the map.
    pub fn pointer_left<G: GeometrySource>(&mut self, scene: &mut MapScene<G>) -> Vec<HoverEvent> {
        let events = self.retarget(None);
        apply(scene, &events);
        events
    }
}

fn apply<G: GeometrySource>(scene: &mut MapScene<G>, events: &[HoverEvent]) {
    for event in events {
        trace!(?event, "hover");
        match *event {
            HoverEvent::Enter(idx) => scene.set_hovered(idx, true),
            HoverEvent::Leave(idx) => scene.set_hovered(idx, false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FixtureMap, catalog};
    use crate::{Binder, MapConfig};
    use regionmap_catalog::LabelMatcher;

    fn scene() -> MapScene<FixtureMap> {
        let cat = catalog();
        let mut map = FixtureMap::new().with_hit_testing();
        map.shape_at(Point::new(0.0, 0.0), 100.0, 100.0);
        map.shape_at(Point::new(200.0, 0.0), 100.0, 100.0);
        map.label_at("San Andrés y Providencia", Point::new(500.0, 0.0));
        map.shape_at(Point::new(500.0, 20.0), 20.0, 20.0);
        let mut scene = MapScene::load(map, &LabelMatcher::new(&cat));
        Binder::new(&MapConfig::default()).bind_all(&mut scene);
        scene
    }

    #[test]
    fn moving_across_shapes_leaves_then_enters() {
        let mut scene = scene();
        let mut hover = HoverTracker::new();
        assert_eq!(
            hover.pointer_moved(&mut scene, Point::new(10.0, 10.0)),
            [HoverEvent::Enter(ShapeIdx(0))]
        );
        assert!(scene.shapes()[0].is_hovered());

        assert_eq!(
            hover.pointer_moved(&mut scene, Point::new(210.0, 10.0)),
            [HoverEvent::Leave(ShapeIdx(0)), HoverEvent::Enter(ShapeIdx(1))]
        );
        assert!(!scene.shapes()[0].is_hovered());
        assert_eq!(scene.hovered_shape(), Some(ShapeIdx(1)));

        assert_eq!(
            hover.pointer_moved(&mut scene, Point::new(120.0, 10.0)),
            [HoverEvent::Leave(ShapeIdx(1))]
        );
        assert_eq!(scene.hovered_shape(), None);
    }

    #[test]
    fn enclave_shapes_do_not_hover() {
        let mut scene = scene();
        let mut hover = HoverTracker::new();
        assert!(hover.pointer_moved(&mut scene, Point::new(500.0, 20.0)).is_empty());
        assert_eq!(hover.current(), None);
    }

    #[test]
    fn shape_centered_on_the_enclave_edge_does_not_hover() {
        let cat = catalog();
        let mut map = FixtureMap::new().with_hit_testing();
        map.label_at("San Andrés y Providencia", Point::new(500.0, 0.0));
        // Enclave spans 430..570; this shape's center sits on x = 570.
        map.shape_at(Point::new(570.0, 0.0), 20.0, 20.0);
        let mut scene = MapScene::load(map, &LabelMatcher::new(&cat));
        Binder::new(&MapConfig::default()).bind_all(&mut scene);

        let mut hover = HoverTracker::new();
        assert!(hover.pointer_moved(&mut scene, Point::new(575.0, 0.0)).is_empty());
        assert_eq!(scene.hovered_shape(), None);
    }

    #[test]
    fn leaving_the_map_clears_hover() {
        let mut scene = scene();
        let mut hover = HoverTracker::new();
        hover.pointer_moved(&mut scene, Point::new(0.0, 0.0));
        assert_eq!(
            hover.pointer_left(&mut scene),
            [HoverEvent::Leave(ShapeIdx(0))]
        );
        assert!(scene.shapes().iter().all(|s| !s.is_hovered()));
        assert!(hover.pointer_left(&mut scene).is_empty());
    }
}
