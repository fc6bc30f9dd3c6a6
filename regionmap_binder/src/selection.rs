// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection Controller: exclusive selection over a bound map.
//!
//! ## States
//!
//! The controller is either [`SelectionState::Idle`] or focused on one region.
//! Every transition into a focused state first clears all label and shape
//! highlights, then highlights the clicked (or first) label of the region and
//! at most one shape found by the [target stages](crate::TargetStage).
//!
//! ## Side effects
//!
//! A new selection is persisted through the [`SelectionStore`] and reported
//! to the [`SelectionHost`]. Label clicks are also narrated; selections made by
//! the host (queries, list buttons, session resume) are not. Persistence
//! failures are logged and do not undo the selection.

use kurbo::Point;
use regionmap_catalog::{Catalog, Region};
use tracing::{debug, info, instrument, warn};

use crate::config::MapConfig;
use crate::error::StoreResult;
use crate::geometry::GeometrySource;
use crate::host::{SelectionHost, SelectionInfo};
use crate::model::{LabelIdx, MapScene};
use crate::narration::{Narrator, Utterance};
use crate::store::SelectionStore;
use crate::target::{Target, TargetResolver};

/// Current selection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    /// Nothing selected.
    #[default]
    Idle,
    /// The region with this id is selected.
    Focused(String),
}

/// What caused a selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectionOrigin {
    /// The user clicked a region label on the map.
    LabelClick,
    /// The host searched for a region by text.
    Query,
    /// The user picked a region from the catalog list.
    List,
    /// The selection was restored from the store at startup.
    Resume,
}

/// Outcome of a successful selection.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    /// The selected region.
    pub region: Region,
    /// What caused it.
    pub origin: SelectionOrigin,
    /// The highlighted label, if a map was available.
    pub label: Option<LabelIdx>,
    /// The highlighted shape, if one was found.
    pub target: Option<Target>,
}

/// Owns the selection state and its side effects.
#[derive(Debug)]
pub struct SelectionController<'c, S, H, N> {
    catalog: &'c Catalog,
    config: &'c MapConfig,
    store: S,
    host: H,
    narrator: N,
    state: SelectionState,
}

impl<'c, S, H, N> SelectionController<'c, S, H, N>
where
    S: SelectionStore,
    H: SelectionHost,
    N: Narrator,
{
    /// Create an idle controller.
    pub fn new(catalog: &'c Catalog, config: &'c MapConfig, store: S, host: H, narrator: N) -> Self {
        Self {
            catalog,
            config,
            store,
            host,
            narrator,
            state: SelectionState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// The selected region, if any.
    pub fn selected_region(&self) -> Option<&'c Region> {
        match &self.state {
            SelectionState::Idle => None,
            SelectionState::Focused(id) => self.catalog.get(id),
        }
    }

    /// The catalog regions are selected from.
    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// The persistence backend.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The host receiving notifications.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The narrator.
    pub fn narrator(&self) -> &N {
        &self.narrator
    }

    /// Restore the persisted selection, once, at startup.
    ///
    /// A stored region that is no longer in the catalog is ignored. The host
    /// is notified; nothing is narrated or written back.
    #[instrument(skip_all)]
    pub fn resume(&mut self) -> StoreResult<Option<&'c Region>> {
        let Some(stored) = self.store.load_selection()? else {
            return Ok(None);
        };
        let Some(region) = self.catalog.get(&stored.id) else {
            warn!(id = %stored.id, "persisted selection is not in the catalog");
            return Ok(None);
        };
        info!(region = %region.id, "selection resumed");
        self.state = SelectionState::Focused(region.id.clone());
        self.host.region_selected(&SelectionInfo::from(region));
        Ok(Some(region))
    }

    /// Select the region named by a clicked label.
    ///
    /// Returns `None`, leaving the state untouched, when the label does not
    /// name a region.
    #[instrument(skip_all, fields(label = label.0))]
    pub fn select_by_label_click<G: GeometrySource>(
        &mut self,
        scene: &mut MapScene<G>,
        label: LabelIdx,
    ) -> Option<Selection> {
        let Some((region_id, anchor)) = scene
            .label(label)
            .and_then(|l| Some((l.resolved_region()?.to_owned(), l.position())))
        else {
            debug!("clicked label names no region");
            return None;
        };
        let region = self.catalog.get(&region_id)?;
        let target = self.highlight(scene, region, label, anchor);
        Some(self.commit(region, SelectionOrigin::LabelClick, Some(label), target))
    }

    /// Select a region by host search text (id or display name).
    ///
    /// Works without a map: pass `None` when geometry is unavailable.
    #[instrument(skip_all, fields(text = text))]
    pub fn select_by_external_query<G: GeometrySource>(
        &mut self,
        scene: Option<&mut MapScene<G>>,
        text: &str,
    ) -> Option<Selection> {
        let Some(region) = self.catalog.search_by_text(text) else {
            debug!("query matches no region");
            return None;
        };
        Some(self.select_region(scene, region, SelectionOrigin::Query))
    }

    /// Select a region by id, as the catalog list buttons do.
    #[instrument(skip_all, fields(id = id))]
    pub fn select_from_list<G: GeometrySource>(
        &mut self,
        scene: Option<&mut MapScene<G>>,
        id: &str,
    ) -> Option<Selection> {
        let Some(region) = self.catalog.get(id) else {
            debug!("list entry is not in the catalog");
            return None;
        };
        Some(self.select_region(scene, region, SelectionOrigin::List))
    }

    /// Return to idle, removing every highlight and persisting `null`.
    #[instrument(skip_all)]
    pub fn clear_selection<G: GeometrySource>(&mut self, scene: Option<&mut MapScene<G>>) {
        if let Some(scene) = scene {
            scene.clear_highlights();
        }
        self.narrator.cancel();
        if self.state == SelectionState::Idle {
            return;
        }
        self.state = SelectionState::Idle;
        if let Err(error) = self.store.save_selection(None) {
            warn!(%error, "failed to persist cleared selection");
        }
        self.host.selection_cleared();
        info!("selection cleared");
    }

    fn select_region<G: GeometrySource>(
        &mut self,
        scene: Option<&mut MapScene<G>>,
        region: &'c Region,
        origin: SelectionOrigin,
    ) -> Selection {
        let (label, target) = match scene {
            Some(scene) => {
                let first = scene.labels_for_region(&region.id).next();
                match first {
                    Some(label) => {
                        let anchor = scene.labels()[label.0].position();
                        (Some(label), self.highlight(scene, region, label, anchor))
                    }
                    None => {
                        scene.clear_highlights();
                        let target = TargetResolver::new(scene, self.config, region, None).resolve();
                        if let Some(t) = target {
                            scene.highlight_shape(t.shape);
                        }
                        (None, target)
                    }
                }
            }
            None => (None, None),
        };
        self.commit(region, origin, label, target)
    }

    fn highlight<G: GeometrySource>(
        &self,
        scene: &mut MapScene<G>,
        region: &Region,
        label: LabelIdx,
        anchor: Point,
    ) -> Option<Target> {
        let target = TargetResolver::new(scene, self.config, region, Some(anchor)).resolve();
        scene.clear_highlights();
        scene.highlight_label(label);
        match target {
            Some(t) => scene.highlight_shape(t.shape),
            None => debug!(region = %region.id, "no shape found for region"),
        }
        target
    }

    fn commit(
        &mut self,
        region: &Region,
        origin: SelectionOrigin,
        label: Option<LabelIdx>,
        target: Option<Target>,
    ) -> Selection {
        info!(
            region = %region.id,
            ?origin,
            stage = ?target.map(|t| t.stage),
            "region selected"
        );
        self.state = SelectionState::Focused(region.id.clone());
        if let Err(error) = self.store.save_selection(Some(region)) {
            warn!(%error, "failed to persist selection");
        }
        self.host.region_selected(&SelectionInfo::from(region));
        if origin == SelectionOrigin::LabelClick {
            self.narrator.cancel();
            self.narrator.speak(&Utterance::for_region(region));
        }
        Selection {
            region: region.clone(),
            origin,
            label,
            target,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::store::{MemoryStore, SELECTION_KEY};
    use crate::target::TargetStage;
    use crate::testing::{FixtureMap, catalog};
    use crate::{Binder, ShapeIdx};
    use regionmap_catalog::LabelMatcher;

    #[derive(Debug, Default)]
    pub(crate) struct Recorder {
        pub(crate) selected: Vec<SelectionInfo>,
        pub(crate) cleared: usize,
        pub(crate) spoken: Vec<Utterance>,
        pub(crate) cancels: usize,
    }

    impl SelectionHost for Recorder {
        fn region_selected(&mut self, info: &SelectionInfo) {
            self.selected.push(info.clone());
        }

        fn selection_cleared(&mut self) {
            self.cleared += 1;
        }
    }

    impl Narrator for Recorder {
        fn cancel(&mut self) {
            self.cancels += 1;
        }

        fn speak(&mut self, utterance: &Utterance) {
            self.spoken.push(utterance.clone());
        }
    }

    fn load(map: FixtureMap, cat: &Catalog, config: &MapConfig) -> MapScene<FixtureMap> {
        let mut scene = MapScene::load(map, &LabelMatcher::new(cat));
        Binder::new(config).bind_all(&mut scene);
        scene
    }

    type Recording<'c> = SelectionController<'c, MemoryStore, Recorder, Recorder>;

    fn controller<'c>(cat: &'c Catalog, config: &'c MapConfig) -> Recording<'c> {
        SelectionController::new(
            cat,
            config,
            MemoryStore::new(),
            Recorder::default(),
            Recorder::default(),
        )
    }

    fn label_of(scene: &MapScene<FixtureMap>, region: &str) -> LabelIdx {
        scene.labels_for_region(region).next().unwrap()
    }

    /// A capital district drawn inside its department.
    fn enclosed_district(hit_testing: bool) -> FixtureMap {
        let mut map = if hit_testing {
            FixtureMap::new().with_hit_testing()
        } else {
            FixtureMap::new()
        };
        map.label_at("Bogotá", Point::ORIGIN);
        map.label_at("Cundinamarca", Point::new(0.0, 70.0));
        if hit_testing {
            // 82 x 61, centered 50 from the district label, which lies inside it.
            map.shape_at(Point::new(40.0, 30.0), 82.0, 61.0);
        } else {
            // 100 x 50, centered 50 from the district label.
            map.shape_at(Point::new(50.0, 0.0), 100.0, 50.0);
        }
        // 200 x 150 department, centered 40 from the district label.
        map.shape_at(Point::new(0.0, 40.0), 200.0, 150.0);
        map
    }

    #[test]
    fn enclosed_district_and_department_stay_apart() {
        for hit_testing in [false, true] {
            let cat = catalog();
            let config = MapConfig::default();
            let mut scene = load(enclosed_district(hit_testing), &cat, &config);
            assert_eq!(scene.shapes()[1].assigned_region(), Some("cundinamarca"));
            assert_ne!(scene.shapes()[0].assigned_region(), Some("cundinamarca"));

            let mut c = controller(&cat, &config);
            let bogota = label_of(&scene, "bogota");
            let sel = c.select_by_label_click(&mut scene, bogota).unwrap();
            assert_eq!(sel.target.map(|t| t.shape), Some(ShapeIdx(0)), "hit testing: {hit_testing}");
            assert_eq!(scene.selected_shapes(), [ShapeIdx(0)]);

            let cundinamarca = label_of(&scene, "cundinamarca");
            let sel = c.select_by_label_click(&mut scene, cundinamarca).unwrap();
            assert_eq!(sel.target.map(|t| t.shape), Some(ShapeIdx(1)), "hit testing: {hit_testing}");
            assert_eq!(scene.selected_shapes(), [ShapeIdx(1)]);
            assert_eq!(scene.selected_labels(), [cundinamarca]);
        }
    }

    #[test]
    fn enclosed_district_binds_by_hit_test_and_selects_exactly() {
        let cat = catalog();
        let config = MapConfig::default();
        let mut scene = load(enclosed_district(true), &cat, &config);
        assert_eq!(scene.shapes()[0].assigned_region(), Some("bogota"));
        let mut c = controller(&cat, &config);
        let bogota = label_of(&scene, "bogota");
        let sel = c.select_by_label_click(&mut scene, bogota).unwrap();
        assert_eq!(sel.target.unwrap().stage, TargetStage::ExactAssignment);
    }

    #[test]
    fn enclosed_district_without_hit_testing_falls_back_to_last_resort() {
        let cat = catalog();
        let config = MapConfig::default();
        let mut scene = load(enclosed_district(false), &cat, &config);
        assert_eq!(scene.shapes()[0].assigned_region(), None);
        let mut c = controller(&cat, &config);
        let bogota = label_of(&scene, "bogota");
        let sel = c.select_by_label_click(&mut scene, bogota).unwrap();
        assert_eq!(sel.target.unwrap().stage, TargetStage::LastResort);
    }

    fn caribbean() -> FixtureMap {
        let mut map = FixtureMap::new();
        for (i, name) in ["Atlántico", "Sucre", "Atlántico"].into_iter().enumerate() {
            let x = i as f64 * 300.0;
            map.shape_at(Point::new(x, 0.0), 60.0, 60.0);
            map.shape_at(Point::new(x, 100.0), 60.0, 60.0);
            map.label_at(name, Point::new(x + 5.0, 0.0));
        }
        map
    }

    #[test]
    fn switching_regions_clears_previous_highlights() {
        let cat = catalog();
        let config = MapConfig::default();
        let mut scene = load(caribbean(), &cat, &config);
        let mut c = controller(&cat, &config);

        let atlantico = label_of(&scene, "atlantico");
        c.select_by_label_click(&mut scene, atlantico).unwrap();
        assert_eq!(scene.selected_shapes().len(), 1);

        let sucre = label_of(&scene, "sucre");
        c.select_by_label_click(&mut scene, sucre).unwrap();
        let selected = scene.selected_shapes();
        assert!(selected.len() <= 1);
        assert!(
            selected
                .iter()
                .all(|&s| scene.shape(s).unwrap().assigned_region() != Some("atlantico"))
        );
        assert_eq!(scene.selected_labels(), [sucre]);
        assert_eq!(c.state(), &SelectionState::Focused("sucre".into()));
    }

    #[test]
    fn every_click_leaves_one_label_and_at_most_one_shape() {
        let cat = catalog();
        let config = MapConfig::default();
        let mut scene = load(caribbean(), &cat, &config);
        let mut c = controller(&cat, &config);
        for i in [0, 1, 2, 1, 0, 0] {
            c.select_by_label_click(&mut scene, LabelIdx(i)).unwrap();
            assert_eq!(scene.selected_labels(), [LabelIdx(i)]);
            assert!(scene.selected_shapes().len() <= 1);
        }
    }

    #[test]
    fn label_click_persists_notifies_and_narrates() {
        let cat = catalog();
        let config = MapConfig::default();
        let mut scene = load(caribbean(), &cat, &config);
        let mut c = controller(&cat, &config);
        let sucre = label_of(&scene, "sucre");
        c.select_by_label_click(&mut scene, sucre).unwrap();

        assert_eq!(c.store().load_selection().unwrap().unwrap().id, "sucre");
        assert_eq!(c.host().selected.len(), 1);
        assert_eq!(c.host().selected[0].capital, "Sincelejo");
        assert_eq!(c.narrator().cancels, 1);
        assert_eq!(c.narrator().spoken.len(), 1);
        assert!(c.narrator().spoken[0].text.starts_with("Sucre. Capital: Sincelejo."));
    }

    #[test]
    fn unresolved_label_changes_nothing() {
        let cat = catalog();
        let config = MapConfig::default();
        let mut map = caribbean();
        map.label_at("Mar Caribe", Point::new(1000.0, 1000.0));
        let mut scene = load(map, &cat, &config);
        let mut c = controller(&cat, &config);
        c.select_by_label_click(&mut scene, LabelIdx(0)).unwrap();
        assert!(c.select_by_label_click(&mut scene, LabelIdx(3)).is_none());
        assert_eq!(c.state(), &SelectionState::Focused("atlantico".into()));
        assert_eq!(scene.selected_labels(), [LabelIdx(0)]);
    }

    #[test]
    fn query_without_geometry_still_selects() {
        let cat = catalog();
        let config = MapConfig::default();
        let mut c = controller(&cat, &config);
        let sel = c
            .select_by_external_query(None::<&mut MapScene<FixtureMap>>, "sucre")
            .unwrap();
        assert_eq!(sel.region.id, "sucre");
        assert_eq!(sel.origin, SelectionOrigin::Query);
        assert_eq!(c.store().get(SELECTION_KEY).unwrap().unwrap()["id"], "sucre");
        assert_eq!(c.host().selected.len(), 1);
        assert!(c.narrator().spoken.is_empty());
        assert!(
            c.select_by_external_query(None::<&mut MapScene<FixtureMap>>, "Narnia")
                .is_none()
        );
    }

    #[test]
    fn query_with_geometry_highlights_first_label() {
        let cat = catalog();
        let config = MapConfig::default();
        let mut scene = load(caribbean(), &cat, &config);
        let mut c = controller(&cat, &config);
        let sel = c
            .select_by_external_query(Some(&mut scene), "ATLÁNTICO")
            .unwrap();
        assert_eq!(sel.label, Some(LabelIdx(0)));
        assert_eq!(scene.selected_labels(), [LabelIdx(0)]);
        assert_eq!(scene.selected_shapes(), [ShapeIdx(0)]);
    }

    #[test]
    fn clear_returns_to_idle_and_persists_null() {
        let cat = catalog();
        let config = MapConfig::default();
        let mut scene = load(caribbean(), &cat, &config);
        let mut c = controller(&cat, &config);
        c.select_by_label_click(&mut scene, LabelIdx(1)).unwrap();
        c.clear_selection(Some(&mut scene));
        assert_eq!(c.state(), &SelectionState::Idle);
        assert!(scene.selected_labels().is_empty());
        assert!(scene.selected_shapes().is_empty());
        assert_eq!(c.store().load_selection().unwrap(), None);
        assert_eq!(c.host().cleared, 1);

        // Clearing again is a no-op for the host.
        c.clear_selection(Some(&mut scene));
        assert_eq!(c.host().cleared, 1);
    }

    #[test]
    fn resume_restores_the_persisted_region() {
        let cat = catalog();
        let config = MapConfig::default();
        let mut store = MemoryStore::new();
        store.save_selection(cat.get("meta")).unwrap();

        let mut c = SelectionController::new(
            &cat,
            &config,
            store,
            Recorder::default(),
            Recorder::default(),
        );
        let region = c.resume().unwrap().unwrap();
        assert_eq!(region.id, "meta");
        assert_eq!(c.selected_region().map(|r| r.id.as_str()), Some("meta"));
        assert_eq!(c.host().selected.len(), 1);
        assert!(c.narrator().spoken.is_empty());
    }

    #[test]
    fn resume_ignores_regions_missing_from_the_catalog() {
        let cat = catalog();
        let config = MapConfig::default();
        let mut store = MemoryStore::new();
        store
            .save_selection(Some(&Region::new(
                "atlantis",
                "Atlántida",
                "Poseidonia",
                regionmap_catalog::RegionGroup::Insular,
            )))
            .unwrap();
        let mut c = SelectionController::new(
            &cat,
            &config,
            store,
            Recorder::default(),
            Recorder::default(),
        );
        assert_eq!(c.resume().unwrap(), None);
        assert_eq!(c.state(), &SelectionState::Idle);
    }
}
