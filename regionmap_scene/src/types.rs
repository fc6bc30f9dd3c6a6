// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: element identifiers, flags, and local element data.

use alloc::string::String;
use kurbo::{Affine, BezPath, Rect, Shape as _};

/// Identifier for an element in the scene.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `ElementId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `ElementId`.
///
/// Use [`Scene::is_alive`](crate::Scene::is_alive) to check whether an `ElementId` still refers
/// to a live element. Stale ids never alias a different live element because the generation
/// must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Element flags controlling visibility, picking and fill.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element is visible (participates in rendering and extent computation).
        const VISIBLE  = 0b0000_0001;
        /// Element is pickable (participates in pointer hit testing).
        const PICKABLE = 0b0000_0010;
        /// Shape has a non-transparent fill. Unfilled shapes are strokes only and
        /// never contain a point.
        const FILLED   = 0b0000_0100;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE | Self::FILLED
    }
}

/// What an element is.
#[derive(Clone, Debug)]
pub enum ElementKind {
    /// A container; its bounds are the union of its children.
    Group,
    /// A closed outline (path, polygon or polyline) in local coordinates.
    Shape {
        /// Outline geometry. Containment uses the non-zero winding rule.
        outline: BezPath,
    },
    /// A run of text.
    Label {
        /// Text content as it appears in the source document.
        text: String,
        /// Local box occupied by the rendered text.
        bounds: Rect,
    },
}

/// Local data for an element.
#[derive(Clone, Debug)]
pub struct LocalElement {
    /// Element kind and its local geometry.
    pub kind: ElementKind,
    /// Local transform relative to parent space.
    pub local_transform: Affine,
    /// Visibility, picking and fill flags.
    pub flags: ElementFlags,
    /// Source identifier of the element (an `id` attribute), if any.
    pub name: Option<String>,
    /// Region identifier already attached to the element by the source document, if any.
    pub region_hint: Option<String>,
}

impl LocalElement {
    /// A group element with default flags.
    pub fn group() -> Self {
        Self::with_kind(ElementKind::Group)
    }

    /// A filled shape element with the given outline.
    pub fn shape(outline: BezPath) -> Self {
        Self::with_kind(ElementKind::Shape { outline })
    }

    /// A filled rectangular shape, convenient for tests and synthetic maps.
    pub fn rect_shape(rect: Rect) -> Self {
        Self::shape(rect.to_path(0.1))
    }

    /// A label element occupying `bounds`.
    pub fn label(text: impl Into<String>, bounds: Rect) -> Self {
        Self::with_kind(ElementKind::Label {
            text: text.into(),
            bounds,
        })
    }

    /// Set the source identifier.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the region hint.
    #[must_use]
    pub fn with_region_hint(mut self, region: impl Into<String>) -> Self {
        self.region_hint = Some(region.into());
        self
    }

    /// Set the local transform.
    #[must_use]
    pub fn transformed(mut self, tf: Affine) -> Self {
        self.local_transform = tf;
        self
    }

    /// Replace the flags.
    #[must_use]
    pub fn with_flags(mut self, flags: ElementFlags) -> Self {
        self.flags = flags;
        self
    }

    fn with_kind(kind: ElementKind) -> Self {
        Self {
            kind,
            local_transform: Affine::IDENTITY,
            flags: ElementFlags::default(),
            name: None,
            region_hint: None,
        }
    }

    /// Local bounds of the element's own geometry. Groups have none.
    pub(crate) fn local_bounds(&self) -> Option<Rect> {
        match &self.kind {
            ElementKind::Group => None,
            ElementKind::Shape { outline } => Some(outline.bounding_box()),
            ElementKind::Label { bounds, .. } => Some(*bounds),
        }
    }
}
