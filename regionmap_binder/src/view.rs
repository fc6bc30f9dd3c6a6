// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zoom and pan of the map view.
//!
//! The view scales the scene about a fixed center and then offsets it. The
//! offset is kept in scene units, so a drag of `d` screen units moves it by
//! `d * pan_factor()` and the map follows the pointer at every zoom level.
//! Selection and binding are unaffected by the view.

use kurbo::{Affine, Point, Vec2};

/// Smallest zoom.
pub const MIN_ZOOM: f64 = 0.5;
/// Largest zoom.
pub const MAX_ZOOM: f64 = 3.0;
/// Factor of one zoom-in button step.
pub const ZOOM_IN_STEP: f64 = 1.15;
/// Factor of one zoom-out button step.
pub const ZOOM_OUT_STEP: f64 = 0.85;
/// Factor of one wheel notch towards the user.
pub const WHEEL_IN_STEP: f64 = 1.08;
/// Factor of one wheel notch away from the user.
pub const WHEEL_OUT_STEP: f64 = 0.92;
/// Pointer travel, in screen units, before a press becomes a drag.
pub const DRAG_THRESHOLD: f64 = 1.0;

#[derive(Copy, Clone, Debug, PartialEq)]
struct Drag {
    last: Point,
    origin: Point,
    dragging: bool,
}

/// Current zoom and pan, plus any drag in progress.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
    center: Point,
    zoom: f64,
    offset: Vec2,
    drag: Option<Drag>,
}

impl ViewTransform {
    /// An identity view scaling about `center` (screen space).
    pub fn new(center: Point) -> Self {
        Self {
            center,
            zoom: 1.0,
            offset: Vec2::ZERO,
            drag: None,
        }
    }

    /// Current zoom factor.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Current offset in scene units.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Zoom as a whole percentage, for display.
    pub fn zoom_percent(&self) -> i64 {
        #[allow(clippy::cast_possible_truncation, reason = "zoom is clamped to a small range")]
        let percent = (self.zoom * 100.0).round() as i64;
        percent
    }

    /// One zoom-in step.
    pub fn zoom_in(&mut self) {
        self.scale_by(ZOOM_IN_STEP);
    }

    /// One zoom-out step.
    pub fn zoom_out(&mut self) {
        self.scale_by(ZOOM_OUT_STEP);
    }

    /// A wheel notch; positive `delta_y` scrolls away from the user.
    pub fn wheel(&mut self, delta_y: f64) {
        if delta_y > 0.0 {
            self.scale_by(WHEEL_OUT_STEP);
        } else if delta_y < 0.0 {
            self.scale_by(WHEEL_IN_STEP);
        }
    }

    /// Back to zoom 1 with no offset.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.offset = Vec2::ZERO;
        self.drag = None;
    }

    /// Scene units moved per screen unit dragged.
    pub fn pan_factor(&self) -> f64 {
        1.0 / self.zoom.max(0.0001)
    }

    /// Screen-from-scene transform.
    pub fn affine(&self) -> Affine {
        Affine::translate(self.center.to_vec2())
            * Affine::scale(self.zoom)
            * Affine::translate(-self.center.to_vec2())
            * Affine::translate(self.offset)
    }

    /// Map a screen point back into the scene, e.g. before hit testing.
    pub fn to_scene(&self, screen: Point) -> Point {
        self.affine().inverse() * screen
    }

    /// Pointer pressed at `screen`.
    pub fn press(&mut self, screen: Point) {
        self.drag = Some(Drag {
            last: screen,
            origin: screen,
            dragging: false,
        });
    }

    /// Pointer moved to `screen`. Returns whether the view panned.
    pub fn drag_to(&mut self, screen: Point) -> bool {
        let factor = self.pan_factor();
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        if !drag.dragging {
            if (screen - drag.origin).hypot() < DRAG_THRESHOLD {
                return false;
            }
            drag.dragging = true;
        }
        self.offset += (screen - drag.last) * factor;
        drag.last = screen;
        true
    }

    /// Pointer released. Returns whether the press was a drag, in which case
    /// it must not also count as a click.
    pub fn release(&mut self) -> bool {
        self.drag.take().is_some_and(|d| d.dragging)
    }

    fn scale_by(&mut self, factor: f64) {
        let next = (self.zoom * factor * 100.0).round() / 100.0;
        self.zoom = next.clamp(MIN_ZOOM, MAX_ZOOM);
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(Point::ORIGIN)
    }
}
