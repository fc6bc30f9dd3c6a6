// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry Source: the capabilities the binder needs from a rendered map.
//!
//! A source exposes shape and label elements in document order, each with an
//! axis-aligned bounding box in one shared scene space. Point containment is
//! an optional capability; sources without it still bind through the
//! nearest-label heuristics.

use core::fmt::Debug;
use core::hash::Hash;

use kurbo::{Point, Rect};

/// What the binder needs to know about a shape element.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeAttributes<Id> {
    /// Whether the shape has a visible fill. Outlines and strokes are not bound.
    pub filled: bool,
    /// The element's own identifier, if the document gave it one.
    pub name: Option<String>,
    /// A region id already written on the element by the document author.
    pub region_hint: Option<String>,
    /// The enclosing group element, if any.
    pub group: Option<Id>,
}

impl<Id> Default for ShapeAttributes<Id> {
    fn default() -> Self {
        Self {
            filled: true,
            name: None,
            region_hint: None,
            group: None,
        }
    }
}

/// Texts of the text runs adjacent to a label, when those neighbours are text
/// runs at all.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdjacentText {
    /// The following text run.
    pub next: Option<String>,
    /// The preceding text run.
    pub previous: Option<String>,
}

/// Read access to shapes and labels of a loaded map document.
pub trait GeometrySource {
    /// Stable identifier of an element for the lifetime of the document.
    type ElementId: Copy + Eq + Hash + Debug;

    /// Shape elements in document order.
    fn shapes(&self) -> Vec<Self::ElementId>;

    /// Label (text) elements in document order.
    fn labels(&self) -> Vec<Self::ElementId>;

    /// Scene-space bounding box of an element.
    fn bounding_box(&self, id: Self::ElementId) -> Option<Rect>;

    /// Attributes of a shape element.
    fn shape_attributes(&self, id: Self::ElementId) -> ShapeAttributes<Self::ElementId>;

    /// Text content of a label element.
    fn label_text(&self, id: Self::ElementId) -> Option<String>;

    /// Text of the neighbouring text runs of a label.
    fn adjacent_text(&self, id: Self::ElementId) -> AdjacentText {
        let _ = id;
        AdjacentText::default()
    }

    /// Scene-space extent of the rendered document. A zero-size extent means
    /// the document did not render.
    fn extent(&self) -> Rect;

    /// The point-in-fill capability, when this source has one.
    fn point_containment(&self) -> Option<&dyn PointContainment<Self::ElementId>> {
        None
    }
}

/// Point-in-fill testing against actual shape outlines, not bounding boxes.
pub trait PointContainment<Id> {
    /// Whether `point` (scene space) lies inside the fill of `shape`.
    fn contains_point(&self, shape: Id, point: Point) -> bool;
}
