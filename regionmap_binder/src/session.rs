// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One map view: presentation, selection, hover and zoom wired together.

use kurbo::Point;
use regionmap_catalog::RegionGroup;
use tracing::warn;

use crate::geometry::GeometrySource;
use crate::host::SelectionHost;
use crate::hover::{HoverEvent, HoverTracker};
use crate::loader::{MapPresentation, RegionButton};
use crate::model::LabelIdx;
use crate::narration::Narrator;
use crate::selection::{Selection, SelectionController};
use crate::store::SelectionStore;
use crate::view::ViewTransform;

/// Routes pointer and host input to the selection controller and hover
/// tracker, for either presentation.
#[derive(Debug)]
pub struct MapSession<'c, G: GeometrySource, S, H, N> {
    presentation: MapPresentation<G>,
    controller: SelectionController<'c, S, H, N>,
    hover: HoverTracker,
    view: ViewTransform,
}

impl<'c, G, S, H, N> MapSession<'c, G, S, H, N>
where
    G: GeometrySource,
    S: SelectionStore,
    H: SelectionHost,
    N: Narrator,
{
    /// Start a session, restoring any persisted selection.
    pub fn open(
        presentation: MapPresentation<G>,
        mut controller: SelectionController<'c, S, H, N>,
    ) -> Self {
        if let Err(error) = controller.resume() {
            warn!(%error, "could not restore the last selection");
        }
        let center = presentation
            .scene()
            .map_or(Point::ORIGIN, |s| s.source().extent().center());
        Self {
            presentation,
            controller,
            hover: HoverTracker::new(),
            view: ViewTransform::new(center),
        }
    }

    /// How the map is shown.
    pub fn presentation(&self) -> &MapPresentation<G> {
        &self.presentation
    }

    /// The selection controller.
    pub fn controller(&self) -> &SelectionController<'c, S, H, N> {
        &self.controller
    }

    /// Zoom and pan.
    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    /// Zoom and pan, for the host's zoom controls and drags.
    pub fn view_mut(&mut self) -> &mut ViewTransform {
        &mut self.view
    }

    /// A click on a label of the interactive map.
    pub fn click_label(&mut self, label: LabelIdx) -> Option<Selection> {
        let scene = self.presentation.scene_mut()?;
        self.controller.select_by_label_click(scene, label)
    }

    /// A click at a screen position: selects the topmost label under it.
    pub fn click_at(&mut self, screen: Point) -> Option<Selection> {
        let point = self.view.to_scene(screen);
        let scene = self.presentation.scene_mut()?;
        let label = scene
            .labels()
            .iter()
            .rposition(|l| l.bounds().contains(point))
            .map(LabelIdx)?;
        self.controller.select_by_label_click(scene, label)
    }

    /// Host search.
    pub fn search(&mut self, text: &str) -> Option<Selection> {
        self.controller
            .select_by_external_query(self.presentation.scene_mut(), text)
    }

    /// A catalog list button.
    pub fn choose(&mut self, id: &str) -> Option<Selection> {
        self.controller
            .select_from_list(self.presentation.scene_mut(), id)
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.controller
            .clear_selection(self.presentation.scene_mut());
    }

    /// Catalog entries for the list view.
    pub fn list(&self, group: Option<RegionGroup>, text: &str) -> Vec<RegionButton> {
        RegionButton::list(self.controller.catalog(), group, text)
    }

    /// Pointer moved to a screen position.
    pub fn pointer_moved(&mut self, screen: Point) -> Vec<HoverEvent> {
        let point = self.view.to_scene(screen);
        match self.presentation.scene_mut() {
            Some(scene) => self.hover.pointer_moved(scene, point),
            None => Vec::new(),
        }
    }

    /// Pointer left the map.
    pub fn pointer_left(&mut self) -> Vec<HoverEvent> {
        match self.presentation.scene_mut() {
            Some(scene) => self.hover.pointer_left(scene),
            None => Vec::new(),
        }
    }
}
