// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`GeometrySource`] for [`regionmap_scene::Scene`].
//!
//! World bounds and transforms are read as of the scene's last commit, so
//! commit before handing the scene to a loader. Hidden elements are not
//! exposed. A group's region hint applies to shapes inside it that carry
//! none of their own.
//!
//! ```
//! use kurbo::Rect;
//! use regionmap_binder::{Binder, MapConfig, MapScene};
//! use regionmap_catalog::{Catalog, LabelMatcher};
//! use regionmap_scene::{LocalElement, Scene};
//!
//! let mut scene = Scene::new();
//! scene.insert(None, LocalElement::rect_shape(Rect::new(0.0, 0.0, 120.0, 80.0)));
//! scene.insert(None, LocalElement::label("Huila", Rect::new(50.0, 35.0, 70.0, 45.0)));
//! scene.commit();
//!
//! let catalog = Catalog::colombia();
//! let config = MapConfig::default();
//! let mut map = MapScene::load(scene, &LabelMatcher::new(&catalog));
//! Binder::new(&config).bind_all(&mut map);
//! assert_eq!(map.shapes()[0].assigned_region(), Some("huila"));
//! ```

use kurbo::{Point, Rect};
use regionmap_scene::{ElementFlags, ElementId, ElementKind, Scene};

use crate::geometry::{AdjacentText, GeometrySource, PointContainment, ShapeAttributes};

fn is_visible(scene: &Scene, id: ElementId) -> bool {
    scene
        .local(id)
        .is_some_and(|l| l.flags.contains(ElementFlags::VISIBLE))
}

fn text_of(scene: &Scene, id: ElementId) -> Option<String> {
    match &scene.local(id)?.kind {
        ElementKind::Label { text, .. } => Some(text.clone()),
        _ => None,
    }
}

impl GeometrySource for Scene {
    type ElementId = ElementId;

    fn shapes(&self) -> Vec<ElementId> {
        Self::shapes(self)
            .into_iter()
            .filter(|&id| is_visible(self, id))
            .collect()
    }

    fn labels(&self) -> Vec<ElementId> {
        Self::labels(self)
            .into_iter()
            .filter(|&id| is_visible(self, id))
            .collect()
    }

    fn bounding_box(&self, id: ElementId) -> Option<Rect> {
        self.world_bounds(id)
    }

    fn shape_attributes(&self, id: ElementId) -> ShapeAttributes<ElementId> {
        let Some(local) = self.local(id) else {
            return ShapeAttributes::default();
        };
        let group = self
            .parent(id)
            .filter(|&p| self.local(p).is_some_and(|l| matches!(l.kind, ElementKind::Group)));
        let region_hint = local.region_hint.clone().or_else(|| {
            group
                .and_then(|g| self.local(g))
                .and_then(|l| l.region_hint.clone())
        });
        ShapeAttributes {
            filled: local.flags.contains(ElementFlags::FILLED),
            name: local.name.clone(),
            region_hint,
            group,
        }
    }

    fn label_text(&self, id: ElementId) -> Option<String> {
        text_of(self, id)
    }

    fn adjacent_text(&self, id: ElementId) -> AdjacentText {
        AdjacentText {
            next: self.next_sibling(id).and_then(|n| text_of(self, n)),
            previous: self.previous_sibling(id).and_then(|p| text_of(self, p)),
        }
    }

    fn extent(&self) -> Rect {
        Self::extent(self)
    }

    fn point_containment(&self) -> Option<&dyn PointContainment<ElementId>> {
        Some(self)
    }
}

impl PointContainment<ElementId> for Scene {
    fn contains_point(&self, shape: ElementId, point: Point) -> bool {
        Self::contains_point(self, shape, point)
    }
}
