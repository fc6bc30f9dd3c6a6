// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bind a hand-drawn sketch of a few departments and print what each shape became.
//!
//! The sketch has a district drawn inside its department, an island label pair
//! in the corner, a split label and some decoration.
//!
//! Run:
//! - `cargo run -p regionmap_demos --example bind_sketch`
//! - `RUST_LOG=regionmap_binder=trace cargo run -p regionmap_demos --example bind_sketch`

use kurbo::Rect;
use regionmap_binder::{Binder, MapConfig, MapScene};
use regionmap_catalog::{Catalog, LabelMatcher};
use regionmap_scene::{LocalElement, Scene};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn label_at(text: &str, x: f64, y: f64) -> LocalElement {
    LocalElement::label(text, Rect::new(x - 10.0, y - 5.0, x + 10.0, y + 5.0))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut scene = Scene::new();

    // Caribbean coast.
    scene.insert(None, LocalElement::rect_shape(Rect::new(100.0, 0.0, 160.0, 50.0)));
    scene.insert(None, LocalElement::rect_shape(Rect::new(160.0, 0.0, 260.0, 120.0)));

    // Cundinamarca with the capital district drawn on top of it.
    scene.insert(None, LocalElement::rect_shape(Rect::new(150.0, 200.0, 350.0, 380.0)));
    scene.insert(None, LocalElement::rect_shape(Rect::new(240.0, 260.0, 290.0, 300.0)));

    // A department drawn as a group of pieces, named by its group.
    let narino = scene.insert(None, LocalElement::group().with_region_hint("Nariño"));
    scene.insert(
        Some(narino),
        LocalElement::rect_shape(Rect::new(0.0, 400.0, 80.0, 470.0)),
    );
    scene.insert(
        Some(narino),
        LocalElement::rect_shape(Rect::new(80.0, 420.0, 110.0, 460.0)),
    );

    // Islands in the corner, and a tick mark too small to be a region.
    scene.insert(None, LocalElement::rect_shape(Rect::new(10.0, 20.0, 30.0, 35.0)));
    scene.insert(None, LocalElement::rect_shape(Rect::new(400.0, 400.0, 403.0, 403.0)));

    scene.insert(None, label_at("Atlántico", 130.0, 25.0));
    scene.insert(None, label_at("BOLÍVAR", 210.0, 60.0));
    scene.insert(None, label_at("Bogotá D.C.", 265.0, 280.0));
    scene.insert(None, label_at("Cundinamarca", 200.0, 350.0));
    scene.insert(None, label_at("San Andrés y", 20.0, 5.0));
    scene.insert(None, label_at("Providencia", 20.0, 15.0));
    scene.insert(None, label_at("Mar Caribe", 60.0, 60.0));
    let extent = scene.commit();
    info!(?extent, "sketch committed");

    let catalog = Catalog::colombia();
    let config = MapConfig::default();
    let mut map = MapScene::load(scene, &LabelMatcher::new(&catalog));

    for label in map.labels() {
        println!(
            "label {:<14} -> {}",
            label.raw_text(),
            label.resolved_region().unwrap_or("-")
        );
    }

    let report = Binder::new(&config).bind_all(&mut map);
    println!("{report:#?}");

    for (i, shape) in map.shapes().iter().enumerate() {
        println!(
            "shape {i}: {:>8.0} px² -> {:<14} ({:?})",
            shape.area(),
            shape.assigned_region().unwrap_or("-"),
            shape.assigned_by()
        );
    }

    assert_eq!(map.shapes()[0].assigned_region(), Some("atlantico"));
    assert_eq!(map.shapes()[2].assigned_region(), Some("cundinamarca"));
    assert_eq!(map.shapes()[3].assigned_region(), Some("bogota"));
    assert!(map.shapes()[4..6]
        .iter()
        .all(|s| s.assigned_region() == Some("narinio")));
    assert_eq!(map.shapes()[6].assigned_region(), None);
    assert_eq!(map.shapes()[7].assigned_region(), None);
}
