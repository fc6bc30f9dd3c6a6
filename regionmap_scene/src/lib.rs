// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Regionmap Scene: a Kurbo-native retained scene for vector maps.
//!
//! A map document (for example an SVG of a country's administrative divisions) is loaded
//! into a [`Scene`] of groups, filled shapes and text labels.
//!
//! - Elements keep a local transform; [`Scene::commit`] composes them into world transforms
//!   and world-space bounding boxes, and reports the rendered extent.
//! - [`Scene::contains_point`] answers precise point-in-fill queries by mapping a world point
//!   into the shape's local space.
//! - [`Scene::hit_test_point`] finds the topmost shape under the pointer.
//! - Sibling navigation ([`Scene::next_sibling`], [`Scene::previous_sibling`]) exposes the
//!   adjacency of text runs, which map documents use to split long names over two lines.
//!
//! The scene does not know about regions or catalogs. Higher layers read geometry and text
//! from it and keep their own binding state.
//!
//! ## Minimal usage
//!
//! ```
//! use regionmap_scene::{LocalElement, QueryFilter, Scene};
//! use kurbo::{Affine, Point, Rect, Vec2};
//!
//! let mut scene = Scene::new();
//! let map = scene.insert(
//!     None,
//!     LocalElement::group().transformed(Affine::translate(Vec2::new(10.0, 0.0))),
//! );
//! let shape = scene.insert(
//!     Some(map),
//!     LocalElement::rect_shape(Rect::new(0.0, 0.0, 50.0, 50.0)).named("sucre-piece"),
//! );
//! let label = scene.insert(
//!     Some(map),
//!     LocalElement::label("Sucre", Rect::new(10.0, 20.0, 40.0, 28.0)),
//! );
//!
//! let extent = scene.commit();
//! assert!(extent.width() > 0.0);
//!
//! let center = scene.world_bounds(label).unwrap().center();
//! assert!(scene.contains_point(shape, center));
//!
//! let filter = QueryFilter { visible_only: true, pickable_only: true };
//! let hit = scene.hit_test_point(Point::new(30.0, 30.0), filter).unwrap();
//! assert_eq!(hit.element, shape);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod scene;
mod types;

pub use scene::{Hit, QueryFilter, Scene};
pub use types::{ElementFlags, ElementId, ElementKind, LocalElement};
