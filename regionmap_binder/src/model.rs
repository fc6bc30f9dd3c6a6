// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The loaded map: shapes and labels with their binding and highlight state.

use kurbo::{Point, Rect};
use regionmap_catalog::LabelMatcher;
use tracing::{debug, trace};

use crate::binder::BindStage;
use crate::geometry::GeometrySource;

/// Index of a [`Shape`] within its [`MapScene`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeIdx(pub usize);

/// Index of a [`Label`] within its [`MapScene`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelIdx(pub usize);

/// A visual piece of the map that may stand for a region.
#[derive(Clone, Debug)]
pub struct Shape<Id> {
    element: Id,
    bounds: Rect,
    filled: bool,
    name: Option<String>,
    group: Option<Id>,
    assigned: Option<(String, BindStage)>,
    selected: bool,
    hovered: bool,
}

impl<Id: Copy> Shape<Id> {
    /// Source element of this shape.
    pub fn element(&self) -> Id {
        self.element
    }

    /// Scene-space bounding box.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Center of the bounding box.
    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    /// `width * height` of the bounding box.
    pub fn area(&self) -> f64 {
        self.bounds.width() * self.bounds.height()
    }

    /// Smaller side of the bounding box.
    pub fn min_dimension(&self) -> f64 {
        self.bounds.width().min(self.bounds.height())
    }

    /// Larger side of the bounding box.
    pub fn max_dimension(&self) -> f64 {
        self.bounds.width().max(self.bounds.height())
    }

    /// Whether the shape has a fill.
    pub fn is_filled(&self) -> bool {
        self.filled
    }

    /// The element's own identifier, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Enclosing group element, if any.
    pub fn group(&self) -> Option<Id> {
        self.group
    }

    /// Region this shape stands for, once bound.
    pub fn assigned_region(&self) -> Option<&str> {
        self.assigned.as_ref().map(|(id, _)| id.as_str())
    }

    /// How the assignment was made.
    pub fn assigned_by(&self) -> Option<BindStage> {
        self.assigned.as_ref().map(|(_, stage)| *stage)
    }

    /// Whether the shape is highlighted as the current selection.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Whether the pointer is over the shape.
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Record an assignment. The first assignment wins; returns whether this
    /// call made one.
    pub(crate) fn assign(&mut self, region: &str, stage: BindStage) -> bool {
        if self.assigned.is_some() {
            return false;
        }
        self.assigned = Some((region.to_owned(), stage));
        true
    }
}

/// A piece of text on the map, possibly naming a region.
#[derive(Clone, Debug)]
pub struct Label<Id> {
    element: Id,
    raw_text: String,
    bounds: Rect,
    resolved: Option<String>,
    selected: bool,
}

impl<Id: Copy> Label<Id> {
    /// Source element of this label.
    pub fn element(&self) -> Id {
        self.element
    }

    /// Text as it appears in the document.
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Scene-space bounding box.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Center of the bounding box.
    pub fn position(&self) -> Point {
        self.bounds.center()
    }

    /// Region the text names, if it names one.
    pub fn resolved_region(&self) -> Option<&str> {
        self.resolved.as_deref()
    }

    /// Whether the label is highlighted as the current selection.
    pub fn is_selected(&self) -> bool {
        self.selected
    }
}

/// Owns the geometry source together with the shapes and labels derived from
/// it, for the lifetime of one document load.
#[derive(Debug)]
pub struct MapScene<G: GeometrySource> {
    source: G,
    shapes: Vec<Shape<G::ElementId>>,
    labels: Vec<Label<G::ElementId>>,
    enclave: Option<Rect>,
}

impl<G: GeometrySource> MapScene<G> {
    /// Read shapes and labels from `source` and resolve label text.
    ///
    /// Elements without a bounding box are skipped. Region hints already
    /// present on shapes are recorded as [`BindStage::Preassigned`] when they
    /// name a catalog region.
    pub fn load(source: G, matcher: &LabelMatcher<'_>) -> Self {
        let mut shapes = Vec::new();
        for element in source.shapes() {
            let Some(bounds) = source.bounding_box(element) else {
                trace!(?element, "shape without bounds skipped");
                continue;
            };
            let attrs = source.shape_attributes(element);
            let mut shape = Shape {
                element,
                bounds,
                filled: attrs.filled,
                name: attrs.name,
                group: attrs.group,
                assigned: None,
                selected: false,
                hovered: false,
            };
            if let Some(hint) = attrs.region_hint.as_deref() {
                match matcher.resolve(hint) {
                    Some(region) => {
                        shape.assign(&region.id, BindStage::Preassigned);
                    }
                    None => debug!(?element, hint, "region hint names no catalog region"),
                }
            }
            shapes.push(shape);
        }

        let mut labels = Vec::new();
        for element in source.labels() {
            let Some(bounds) = source.bounding_box(element) else {
                trace!(?element, "label without bounds skipped");
                continue;
            };
            let raw_text = source.label_text(element).unwrap_or_default();
            let adjacent = source.adjacent_text(element);
            let resolved = matcher
                .resolve_with_neighbors(
                    &raw_text,
                    adjacent.next.as_deref(),
                    adjacent.previous.as_deref(),
                )
                .map(|r| r.id.clone());
            if resolved.is_none() {
                trace!(text = %raw_text, "label does not name a region");
            }
            labels.push(Label {
                element,
                raw_text,
                bounds,
                resolved,
                selected: false,
            });
        }

        debug!(
            shapes = shapes.len(),
            labels = labels.len(),
            resolved = labels.iter().filter(|l| l.resolved.is_some()).count(),
            "map scene loaded"
        );
        Self {
            source,
            shapes,
            labels,
            enclave: None,
        }
    }

    /// The geometry source.
    pub fn source(&self) -> &G {
        &self.source
    }

    /// All shapes in document order.
    pub fn shapes(&self) -> &[Shape<G::ElementId>] {
        &self.shapes
    }

    /// All labels in document order.
    pub fn labels(&self) -> &[Label<G::ElementId>] {
        &self.labels
    }

    /// A shape by index.
    pub fn shape(&self, idx: ShapeIdx) -> Option<&Shape<G::ElementId>> {
        self.shapes.get(idx.0)
    }

    /// A label by index.
    pub fn label(&self, idx: LabelIdx) -> Option<&Label<G::ElementId>> {
        self.labels.get(idx.0)
    }

    /// Index of the shape backed by `element`.
    pub fn shape_for_element(&self, element: G::ElementId) -> Option<ShapeIdx> {
        self.shapes
            .iter()
            .position(|s| s.element == element)
            .map(ShapeIdx)
    }

    /// Index of the label backed by `element`.
    pub fn label_for_element(&self, element: G::ElementId) -> Option<LabelIdx> {
        self.labels
            .iter()
            .position(|l| l.element == element)
            .map(LabelIdx)
    }

    /// Labels resolved to `region`, in document order.
    pub fn labels_for_region<'a>(&'a self, region: &'a str) -> impl Iterator<Item = LabelIdx> + 'a {
        self.labels
            .iter()
            .enumerate()
            .filter(move |(_, l)| l.resolved.as_deref() == Some(region))
            .map(|(i, _)| LabelIdx(i))
    }

    /// Shapes bound to `region`, in document order.
    pub fn shapes_for_region<'a>(&'a self, region: &'a str) -> impl Iterator<Item = ShapeIdx> + 'a {
        self.shapes
            .iter()
            .enumerate()
            .filter(move |(_, s)| s.assigned_region() == Some(region))
            .map(|(i, _)| ShapeIdx(i))
    }

    /// Currently highlighted shapes. At most one after any selection.
    pub fn selected_shapes(&self) -> Vec<ShapeIdx> {
        self.shapes
            .iter()
            .enumerate()
            .filter(|(_, s)| s.selected)
            .map(|(i, _)| ShapeIdx(i))
            .collect()
    }

    /// Currently highlighted labels.
    pub fn selected_labels(&self) -> Vec<LabelIdx> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, l)| l.selected)
            .map(|(i, _)| LabelIdx(i))
            .collect()
    }

    /// The shape currently under the pointer, if any.
    pub fn hovered_shape(&self) -> Option<ShapeIdx> {
        self.shapes.iter().position(|s| s.hovered).map(ShapeIdx)
    }

    /// Exclusion rectangle computed by the last binding pass.
    pub fn enclave(&self) -> Option<Rect> {
        self.enclave
    }

    /// Whether `point` lies in the enclave rectangle, edges included.
    pub fn in_enclave(&self, point: Point) -> bool {
        self.enclave.is_some_and(|r| {
            r.x0 <= point.x && point.x <= r.x1 && r.y0 <= point.y && point.y <= r.y1
        })
    }

    /// Topmost shape under `point`, using point containment when the source
    /// has it and bounding boxes otherwise. Later shapes paint over earlier ones.
    pub fn shape_at(&self, point: Point) -> Option<ShapeIdx> {
        let containment = self.source.point_containment();
        self.shapes
            .iter()
            .rposition(|s| {
                s.bounds.contains(point)
                    && containment.is_none_or(|c| c.contains_point(s.element, point))
            })
            .map(ShapeIdx)
    }

    pub(crate) fn shape_mut(&mut self, idx: ShapeIdx) -> &mut Shape<G::ElementId> {
        &mut self.shapes[idx.0]
    }

    pub(crate) fn set_enclave(&mut self, rect: Option<Rect>) {
        self.enclave = rect;
    }

    pub(crate) fn set_hovered(&mut self, idx: ShapeIdx, hovered: bool) {
        if let Some(shape) = self.shapes.get_mut(idx.0) {
            shape.hovered = hovered;
        }
    }

    /// Remove every shape and label highlight.
    pub(crate) fn clear_highlights(&mut self) {
        for shape in &mut self.shapes {
            shape.selected = false;
        }
        for label in &mut self.labels {
            label.selected = false;
        }
    }

    pub(crate) fn highlight_label(&mut self, idx: LabelIdx) {
        if let Some(label) = self.labels.get_mut(idx.0) {
            label.selected = true;
        }
    }

    pub(crate) fn highlight_shape(&mut self, idx: ShapeIdx) {
        if let Some(shape) = self.shapes.get_mut(idx.0) {
            shape.selected = true;
        }
    }
}
