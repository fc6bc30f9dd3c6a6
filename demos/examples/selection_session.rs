// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drive a map session: hover, label clicks, host search, list picks, zoom and
//! clearing, with the selection persisted to a JSON file and restored on reopen.
//!
//! Run:
//! - `cargo run -p regionmap_demos --example selection_session`

use std::path::Path;

use kurbo::{Point, Rect};
use regionmap_binder::narration::{Narrator, Utterance};
use regionmap_binder::{
    FnLoader, GeometryResult, JsonFileStore, MapConfig, MapSession, SelectionController,
    SelectionHost, SelectionInfo, present,
};
use regionmap_catalog::Catalog;
use regionmap_scene::{LocalElement, Scene};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct PrintHost;

impl SelectionHost for PrintHost {
    fn region_selected(&mut self, info: &SelectionInfo) {
        println!("  host: selected {} ({}, capital {})", info.display_name, info.group, info.capital);
    }

    fn selection_cleared(&mut self) {
        println!("  host: selection cleared");
    }
}

#[derive(Debug)]
struct PrintNarrator;

impl Narrator for PrintNarrator {
    fn cancel(&mut self) {}

    fn speak(&mut self, utterance: &Utterance) {
        println!("  says [{}]: {}", utterance.language, utterance.text);
    }
}

fn sketch() -> GeometryResult<Scene> {
    let mut scene = Scene::new();
    scene.insert(None, LocalElement::rect_shape(Rect::new(0.0, 0.0, 90.0, 70.0)));
    scene.insert(None, LocalElement::rect_shape(Rect::new(0.0, 70.0, 90.0, 150.0)));
    scene.insert(None, LocalElement::label("Tolima", Rect::new(35.0, 30.0, 55.0, 40.0)));
    scene.insert(None, LocalElement::label("Huila", Rect::new(35.0, 105.0, 55.0, 115.0)));
    scene.commit();
    Ok(scene)
}

fn open<'c>(
    catalog: &'c Catalog,
    config: &'c MapConfig,
    store: &Path,
) -> MapSession<'c, Scene, JsonFileStore, PrintHost, PrintNarrator> {
    let mut loader = FnLoader::new("sketch", sketch);
    let presentation = present(&mut [&mut loader], catalog, config);
    let controller = SelectionController::new(
        catalog,
        config,
        JsonFileStore::new(store),
        PrintHost,
        PrintNarrator,
    );
    MapSession::open(presentation, controller)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let catalog = Catalog::colombia();
    let config = MapConfig::default();
    let store = std::env::temp_dir().join("regionmap_demo").join("selection.json");
    let _ = std::fs::remove_file(&store);

    let mut session = open(&catalog, &config, &store);
    println!("opened, selected: {:?}", session.controller().selected_region().map(|r| &r.id));

    println!("hover: {:?}", session.pointer_moved(Point::new(45.0, 100.0)));
    println!("hover: {:?}", session.pointer_moved(Point::new(45.0, 20.0)));
    println!("hover: {:?}", session.pointer_left());

    println!("click on Tolima's label");
    let tolima = session.click_at(Point::new(45.0, 35.0));
    assert_eq!(tolima.as_ref().map(|s| s.region.id.as_str()), Some("tolima"));

    session.view_mut().zoom_in();
    println!("zoom {}%", session.view().zoom_percent());
    let huila_on_screen = session.view().affine() * Point::new(45.0, 110.0);
    println!("click on Huila's label at {huila_on_screen:?}");
    let huila = session.click_at(huila_on_screen);
    assert_eq!(huila.as_ref().map(|s| s.region.id.as_str()), Some("huila"));
    session.view_mut().reset();

    println!("host searches for \"TOLIMA\"");
    let found = session.search("TOLIMA").map(|s| (s.region.id, s.target.map(|t| t.stage)));
    println!("  -> {found:?}");

    println!("list pick: meta (not drawn on this map)");
    let meta = session.choose("meta");
    println!("  -> target {:?}", meta.and_then(|s| s.target));

    println!("host searches for \"Huila\"");
    session.search("Huila");
    println!("stored: {}", std::fs::read_to_string(&store).unwrap_or_default());
    drop(session);

    println!("reopening");
    let mut session = open(&catalog, &config, &store);
    let resumed = session.controller().selected_region().map(|r| r.id.clone());
    info!(region = ?resumed, "reopened session restored the selection");
    assert_eq!(resumed.as_deref(), Some("huila"));

    session.clear();
    println!("stored after clear: {}", std::fs::read_to_string(&store).unwrap_or_default());
    assert!(session.controller().selected_region().is_none());
    info!(store = %store.display(), "demo finished");
}
