// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core scene implementation: structure, updates, queries.

use alloc::vec::Vec;
use kurbo::{Affine, Point, Rect, Shape as _};

use crate::types::{ElementFlags, ElementId, ElementKind, LocalElement};

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// A retained vector scene loaded from one map document.
///
/// Elements form a forest in document order. Call [`Scene::commit`] after
/// structural or transform changes to refresh world transforms and bounds.
#[derive(Clone)]
pub struct Scene {
    elements: Vec<Option<Element>>, // slots
    generations: Vec<u32>,          // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    roots: Vec<ElementId>,
    extent: Rect,
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.elements.len();
        let alive = self.elements.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Scene")
            .field("elements_total", &total)
            .field("elements_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("extent", &self.extent)
            .finish_non_exhaustive()
    }
}

/// Result of a pointer hit test.
#[derive(Clone, Debug)]
pub struct Hit {
    /// The matched shape.
    pub element: ElementId,
    /// Path from root to the shape (inclusive).
    pub path: Vec<ElementId>,
}

/// Filters applied during hit testing.
///
/// Used by [`Scene::hit_test_point`].
#[derive(Clone, Copy, Debug, Default)]
pub struct QueryFilter {
    /// If true, only consider elements marked [`ElementFlags::VISIBLE`].
    pub visible_only: bool,
    /// If true, only consider elements marked [`ElementFlags::PICKABLE`].
    pub pickable_only: bool,
}

#[derive(Clone, Debug, Default)]
struct WorldElement {
    world_transform: Affine,
    world_bounds: Rect,
}

#[derive(Clone, Debug)]
struct Element {
    generation: u32,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    local: LocalElement,
    world: WorldElement,
}

impl Element {
    fn new(generation: u32, local: LocalElement) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            local,
            world: WorldElement::default(),
        }
    }
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            roots: Vec::new(),
            extent: Rect::ZERO,
        }
    }

    /// Insert a new element as the last child of `parent` (or as a root if `None`).
    pub fn insert(&mut self, parent: Option<ElementId>, local: LocalElement) -> ElementId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.elements[idx] = Some(Element::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId holds 32-bit slot indices."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.elements.push(Some(Element::new(generation, local)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId holds 32-bit slot indices."
            )]
            ((self.elements.len() - 1) as u32, generation)
        };
        let id = ElementId::new(idx, generation);
        match parent {
            Some(p) if self.is_alive(p) => {
                self.element_mut(p).children.push(id);
                self.element_mut(id).parent = Some(p);
            }
            _ => self.roots.push(id),
        }
        id
    }

    /// Remove an element (and its subtree) from the scene.
    pub fn remove(&mut self, id: ElementId) {
        if !self.is_alive(id) {
            return;
        }
        match self.element(id).parent {
            Some(parent) => self.element_mut(parent).children.retain(|c| *c != id),
            None => self.roots.retain(|r| *r != id),
        }
        let children = self.element(id).children.clone();
        for child in children {
            self.remove(child);
        }
        self.elements[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Update an element's local transform.
    pub fn set_local_transform(&mut self, id: ElementId, tf: Affine) {
        if let Some(n) = self.element_opt_mut(id) {
            n.local.local_transform = tf;
        }
    }

    /// Update an element's flags.
    pub fn set_flags(&mut self, id: ElementId, flags: ElementFlags) {
        if let Some(n) = self.element_opt_mut(id) {
            n.local.flags = flags;
        }
    }

    /// Refresh world transforms and bounds, returning the world extent of
    /// all visible shapes and labels.
    ///
    /// An empty extent (zero width and height) means the document rendered
    /// nothing; loaders treat it as a failed render.
    pub fn commit(&mut self) -> Rect {
        let roots = self.roots.clone();
        for root in roots {
            self.update_world_recursive(root, Affine::IDENTITY);
        }
        let mut extent: Option<Rect> = None;
        for slot in self.elements.iter().flatten() {
            if matches!(slot.local.kind, ElementKind::Group)
                || !slot.local.flags.contains(ElementFlags::VISIBLE)
            {
                continue;
            }
            let b = slot.world.world_bounds;
            extent = Some(extent.map_or(b, |e| e.union(b)));
        }
        self.extent = extent.unwrap_or(Rect::ZERO);
        self.extent
    }

    /// World extent computed by the last [`Scene::commit`].
    pub fn extent(&self) -> Rect {
        self.extent
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.elements
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Local data of a live element.
    pub fn local(&self, id: ElementId) -> Option<&LocalElement> {
        self.element_opt(id).map(|n| &n.local)
    }

    /// World-space bounding box of a live element as of the last commit.
    pub fn world_bounds(&self, id: ElementId) -> Option<Rect> {
        self.element_opt(id).map(|n| n.world.world_bounds)
    }

    /// Local → world transform of a live element as of the last commit.
    pub fn world_transform(&self, id: ElementId) -> Option<Affine> {
        self.element_opt(id).map(|n| n.world.world_transform)
    }

    /// Parent of a live element.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.element_opt(id)?.parent
    }

    /// Children of a live element in document order.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.element_opt(id).map_or(&[], |n| n.children.as_slice())
    }

    /// The element immediately after `id` among its siblings.
    pub fn next_sibling(&self, id: ElementId) -> Option<ElementId> {
        let siblings = self.siblings(id)?;
        let pos = siblings.iter().position(|s| *s == id)?;
        siblings.get(pos + 1).copied()
    }

    /// The element immediately before `id` among its siblings.
    pub fn previous_sibling(&self, id: ElementId) -> Option<ElementId> {
        let siblings = self.siblings(id)?;
        let pos = siblings.iter().position(|s| *s == id)?;
        pos.checked_sub(1).map(|p| siblings[p])
    }

    /// All live elements in document order (pre-order, roots in insertion order).
    pub fn document_order(&self) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Shape elements in document order.
    pub fn shapes(&self) -> Vec<ElementId> {
        self.document_order()
            .into_iter()
            .filter(|id| {
                self.local(*id)
                    .is_some_and(|l| matches!(l.kind, ElementKind::Shape { .. }))
            })
            .collect()
    }

    /// Label elements in document order.
    pub fn labels(&self) -> Vec<ElementId> {
        self.document_order()
            .into_iter()
            .filter(|id| {
                self.local(*id)
                    .is_some_and(|l| matches!(l.kind, ElementKind::Label { .. }))
            })
            .collect()
    }

    /// Whether a world-space point falls inside a shape's fill.
    ///
    /// The point is mapped into the shape's local space with the inverse of its
    /// world transform. Unfilled shapes, groups and labels never contain a point.
    pub fn contains_point(&self, id: ElementId, world_pt: Point) -> bool {
        let Some(n) = self.element_opt(id) else {
            return false;
        };
        let ElementKind::Shape { outline } = &n.local.kind else {
            return false;
        };
        if !n.local.flags.contains(ElementFlags::FILLED) {
            return false;
        }
        let local_pt = n.world.world_transform.inverse() * world_pt;
        outline.contains(local_pt)
    }

    /// Hit test a world-space point. Returns the topmost shape whose fill contains it.
    ///
    /// Later elements in document order are drawn on top and win.
    pub fn hit_test_point(&self, pt: Point, filter: QueryFilter) -> Option<Hit> {
        let best = self
            .shapes()
            .into_iter()
            .filter(|id| {
                let Some(n) = self.element_opt(*id) else {
                    return false;
                };
                if filter.visible_only && !n.local.flags.contains(ElementFlags::VISIBLE) {
                    return false;
                }
                if filter.pickable_only && !n.local.flags.contains(ElementFlags::PICKABLE) {
                    return false;
                }
                n.world.world_bounds.contains(pt)
            })
            .filter(|id| self.contains_point(*id, pt))
            .last()?;
        Some(Hit {
            element: best,
            path: self.path_to_root(best),
        })
    }

    // --- internals ---

    fn element(&self, id: ElementId) -> &Element {
        self.elements[id.idx()].as_ref().expect("dangling ElementId")
    }

    fn element_mut(&mut self, id: ElementId) -> &mut Element {
        self.elements[id.idx()].as_mut().expect("dangling ElementId")
    }

    fn element_opt(&self, id: ElementId) -> Option<&Element> {
        let n = self.elements.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn element_opt_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        let n = self.elements.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn siblings(&self, id: ElementId) -> Option<&[ElementId]> {
        match self.element_opt(id)?.parent {
            Some(p) => Some(self.children(p)),
            None => Some(self.roots.as_slice()),
        }
    }

    fn path_to_root(&self, mut id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        loop {
            out.push(id);
            match self.element(id).parent {
                Some(p) => id = p,
                None => break,
            }
        }
        out.reverse();
        out
    }

    fn update_world_recursive(&mut self, id: ElementId, parent_tf: Affine) -> Option<Rect> {
        let (world_tf, own_bounds, child_ids) = {
            let n = self.element_mut(id);
            n.world.world_transform = parent_tf * n.local.local_transform;
            let own = n
                .local
                .local_bounds()
                .map(|b| transform_rect_bbox(n.world.world_transform, b));
            (n.world.world_transform, own, n.children.clone())
        };

        let mut bounds = own_bounds;
        for child in child_ids {
            if let Some(cb) = self.update_world_recursive(child, world_tf) {
                bounds = Some(bounds.map_or(cb, |b| b.union(cb)));
            }
        }
        self.element_mut(id).world.world_bounds = bounds.unwrap_or(Rect::ZERO);
        bounds
    }
}

/// Transform an axis-aligned `Rect` by an `Affine` and return a conservative
/// axis-aligned bounding box in world space.
fn transform_rect_bbox(affine: Affine, rect: Rect) -> Rect {
    let p0 = affine * Point::new(rect.x0, rect.y0);
    let p1 = affine * Point::new(rect.x1, rect.y0);
    let p2 = affine * Point::new(rect.x0, rect.y1);
    let p3 = affine * Point::new(rect.x1, rect.y1);
    let min_x = p0.x.min(p1.x).min(p2.x).min(p3.x);
    let min_y = p0.y.min(p1.y).min(p2.y).min(p3.y);
    let max_x = p0.x.max(p1.x).max(p2.x).max(p3.x);
    let max_y = p0.y.max(p1.y).max(p2.y).max(p3.y);
    Rect::new(min_x, min_y, max_x, max_y)
}
