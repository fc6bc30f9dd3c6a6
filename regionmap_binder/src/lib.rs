// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Regionmap Binder: bind the shapes of an arbitrary vector map to catalog
//! regions, then keep an exclusive selection over that binding.
//!
//! - [`GeometrySource`]: the capabilities needed from a rendered map (bounding
//!   boxes, label text, optional point-in-fill).
//! - [`MapScene`]: shapes and labels of one loaded document, with label text
//!   resolved through a [`LabelMatcher`](regionmap_catalog::LabelMatcher).
//! - [`Binder`]: the one-shot pass assigning regions to shapes.
//! - [`SelectionController`]: label clicks, host queries and clears, with
//!   persistence ([`SelectionStore`]), host notification ([`SelectionHost`]) and
//!   narration ([`Narrator`]).
//! - [`present`]: loader chain that degrades to a catalog list.
//! - [`MapSession`]: all of the above plus hover and zoom for one view.
//! - [`MapConfig`]: every tuned threshold, loadable from TOML.
//!
//! With the `scene_adapter` feature (on by default), `regionmap_scene::Scene`
//! is a [`GeometrySource`].
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use regionmap_binder::{
//!     FnLoader, GeometryResult, MapConfig, MapSession, MemoryStore, NoHost, SelectionController,
//!     Silent, present,
//! };
//! use regionmap_catalog::Catalog;
//! use regionmap_scene::{LocalElement, Scene};
//!
//! let catalog = Catalog::colombia();
//! let config = MapConfig::default();
//!
//! let mut loader = FnLoader::new("inline", || -> GeometryResult<Scene> {
//!     let mut scene = Scene::new();
//!     scene.insert(None, LocalElement::rect_shape(Rect::new(0.0, 0.0, 90.0, 70.0)));
//!     scene.insert(None, LocalElement::label("Tolima", Rect::new(35.0, 30.0, 55.0, 40.0)));
//!     scene.commit();
//!     Ok(scene)
//! });
//! let presentation = present(&mut [&mut loader], &catalog, &config);
//!
//! let controller = SelectionController::new(&catalog, &config, MemoryStore::new(), NoHost, Silent);
//! let mut session = MapSession::open(presentation, controller);
//! let selection = session.click_at(Point::new(45.0, 35.0)).unwrap();
//! assert_eq!(selection.region.capital, "Ibagué");
//! assert!(selection.target.is_some());
//! ```

pub mod adapters;
mod binder;
mod config;
mod error;
mod geometry;
mod host;
pub mod hover;
mod loader;
mod model;
pub mod narration;
mod selection;
mod session;
mod store;
mod target;
pub mod view;

#[cfg(test)]
mod testing;

pub use binder::{BindReport, BindStage, Binder};
pub use config::{
    CandidateFilter, EnclaveRule, EnclosurePair, EnclosureRole, LastResort, MapConfig,
    ProximityRule, ProximityTier, SelectionTuning, ThresholdTable,
};
pub use error::{
    ConfigError, ConfigResult, GeometryError, GeometryResult, MapError, MapResult, StoreError,
    StoreResult,
};
pub use geometry::{AdjacentText, GeometrySource, PointContainment, ShapeAttributes};
pub use host::{NoHost, SelectionHost, SelectionInfo};
pub use loader::{FnLoader, GeometryLoader, MapPresentation, RegionButton, present};
pub use model::{Label, LabelIdx, MapScene, Shape, ShapeIdx};
pub use narration::{Narrator, Silent, Utterance};
pub use selection::{Selection, SelectionController, SelectionOrigin, SelectionState};
pub use session::MapSession;
pub use store::{JsonFileStore, MemoryStore, SELECTION_KEY, SelectionStore};
pub use target::{Target, TargetStage};
