// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory geometry for unit tests.

use kurbo::{Point, Rect};
use regionmap_catalog::Catalog;

use crate::geometry::{AdjacentText, GeometrySource, PointContainment, ShapeAttributes};

pub(crate) fn catalog() -> Catalog {
    Catalog::colombia()
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum FixtureId {
    Shape(usize),
    Label(usize),
    Group(usize),
}

#[derive(Clone, Debug)]
struct FixtureShape {
    bounds: Rect,
    attrs: ShapeAttributes<FixtureId>,
}

/// Shapes are their bounding boxes; consecutive labels are adjacent text runs.
#[derive(Clone, Debug, Default)]
pub(crate) struct FixtureMap {
    shapes: Vec<FixtureShape>,
    labels: Vec<(String, Rect)>,
    hit_testing: bool,
}

impl FixtureMap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Expose point containment (a point is inside a shape's box).
    pub(crate) fn with_hit_testing(mut self) -> Self {
        self.hit_testing = true;
        self
    }

    pub(crate) fn shape(&mut self, bounds: Rect) -> FixtureId {
        self.shapes.push(FixtureShape {
            bounds,
            attrs: ShapeAttributes::default(),
        });
        FixtureId::Shape(self.shapes.len() - 1)
    }

    /// A shape of `width` x `height` centered on `center`.
    pub(crate) fn shape_at(&mut self, center: Point, width: f64, height: f64) -> FixtureId {
        self.shape(Rect::from_center_size(center, (width, height)))
    }

    pub(crate) fn outline(&mut self, bounds: Rect) -> FixtureId {
        let id = self.shape(bounds);
        self.attrs(id).filled = false;
        id
    }

    pub(crate) fn set_hint(&mut self, id: FixtureId, region: &str) {
        self.attrs(id).region_hint = Some(region.to_owned());
    }

    pub(crate) fn set_name(&mut self, id: FixtureId, name: &str) {
        self.attrs(id).name = Some(name.to_owned());
    }

    pub(crate) fn set_group(&mut self, id: FixtureId, group: usize) {
        self.attrs(id).group = Some(FixtureId::Group(group));
    }

    pub(crate) fn label(&mut self, text: &str, bounds: Rect) -> FixtureId {
        self.labels.push((text.to_owned(), bounds));
        FixtureId::Label(self.labels.len() - 1)
    }

    /// A 20 x 10 label centered on `center`.
    pub(crate) fn label_at(&mut self, text: &str, center: Point) -> FixtureId {
        self.label(text, Rect::from_center_size(center, (20.0, 10.0)))
    }

    fn attrs(&mut self, id: FixtureId) -> &mut ShapeAttributes<FixtureId> {
        let FixtureId::Shape(i) = id else {
            panic!("{id:?} is not a shape");
        };
        &mut self.shapes[i].attrs
    }
}

impl GeometrySource for FixtureMap {
    type ElementId = FixtureId;

    fn shapes(&self) -> Vec<FixtureId> {
        (0..self.shapes.len()).map(FixtureId::Shape).collect()
    }

    fn labels(&self) -> Vec<FixtureId> {
        (0..self.labels.len()).map(FixtureId::Label).collect()
    }

    fn bounding_box(&self, id: FixtureId) -> Option<Rect> {
        match id {
            FixtureId::Shape(i) => self.shapes.get(i).map(|s| s.bounds),
            FixtureId::Label(i) => self.labels.get(i).map(|(_, r)| *r),
            FixtureId::Group(_) => None,
        }
    }

    fn shape_attributes(&self, id: FixtureId) -> ShapeAttributes<FixtureId> {
        match id {
            FixtureId::Shape(i) => self.shapes[i].attrs.clone(),
            _ => ShapeAttributes::default(),
        }
    }

    fn label_text(&self, id: FixtureId) -> Option<String> {
        match id {
            FixtureId::Label(i) => self.labels.get(i).map(|(t, _)| t.clone()),
            _ => None,
        }
    }

    fn adjacent_text(&self, id: FixtureId) -> AdjacentText {
        let FixtureId::Label(i) = id else {
            return AdjacentText::default();
        };
        AdjacentText {
            next: self.labels.get(i + 1).map(|(t, _)| t.clone()),
            previous: i
                .checked_sub(1)
                .and_then(|p| self.labels.get(p))
                .map(|(t, _)| t.clone()),
        }
    }

    fn extent(&self) -> Rect {
        self.shapes
            .iter()
            .map(|s| s.bounds)
            .reduce(|a, b| a.union(b))
            .unwrap_or(Rect::ZERO)
    }

    fn point_containment(&self) -> Option<&dyn PointContainment<FixtureId>> {
        self.hit_testing.then_some(self as &dyn PointContainment<FixtureId>)
    }
}

impl PointContainment<FixtureId> for FixtureMap {
    fn contains_point(&self, shape: FixtureId, point: Point) -> bool {
        match shape {
            FixtureId::Shape(i) => self.shapes.get(i).is_some_and(|s| s.bounds.contains(point)),
            _ => false,
        }
    }
}
