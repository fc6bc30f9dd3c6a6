// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fall back to the catalog list when no geometry loads, with tuning read from TOML.
//!
//! Run:
//! - `cargo run -p regionmap_demos --example catalog_fallback`

use regionmap_binder::{
    FnLoader, GeometryError, GeometryResult, MapConfig, MapPresentation, MapSession,
    MemoryStore, NoHost, SELECTION_KEY, SelectionController, SelectionStore, Silent, present,
};
use regionmap_catalog::{Catalog, RegionGroup};
use regionmap_scene::Scene;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const TUNING: &str = r#"
[candidate]
min_dimension = 4.0
min_area = 100.0

[enclave]
region = "san_andres"
padding = 80.0
"#;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match MapConfig::from_toml_str(TUNING) {
        Ok(config) => config,
        Err(error) => {
            error!(%error, "bad tuning");
            return;
        }
    };
    println!("candidate filter: {:?}", config.candidate);

    let catalog = Catalog::colombia();

    let mut embedded = FnLoader::new("embedded", || -> GeometryResult<Scene> {
        Err(GeometryError::Unavailable {
            strategy: "embedded".into(),
            reason: "no map document bundled".into(),
        })
    });
    let mut blank = FnLoader::new("blank", || -> GeometryResult<Scene> { Ok(Scene::new()) });
    let presentation = present(&mut [&mut embedded, &mut blank], &catalog, &config);
    assert!(!presentation.is_interactive());

    if let MapPresentation::CatalogList(buttons) = &presentation {
        info!(buttons = buttons.len(), "showing the catalog list");
    }

    let controller =
        SelectionController::new(&catalog, &config, MemoryStore::new(), NoHost, Silent);
    let mut session = MapSession::open(presentation, controller);

    for group in RegionGroup::ALL {
        let names: Vec<_> = session
            .list(Some(group), "")
            .into_iter()
            .map(|b| b.display_name)
            .collect();
        println!("{group}: {}", names.join(", "));
    }

    let picked = session.choose("amazonas");
    println!("picked: {:?}", picked.as_ref().map(|s| &s.region.display_name));
    let searched = session.search("san andres y providencia");
    println!("searched: {:?}", searched.as_ref().map(|s| &s.region.display_name));

    let stored = session.controller().store().get(SELECTION_KEY);
    println!("stored: {stored:?}");
}
