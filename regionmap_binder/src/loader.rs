// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loading map geometry, degrading to a plain catalog list.
//!
//! Loaders are tried in order (typically an inline parse, then an embedded
//! rendering of the same document). A loader that fails, or whose document
//! renders with a zero-size extent, is logged and skipped. When none succeeds
//! the map presents the catalog as a list of buttons instead.

use regionmap_catalog::{Catalog, LabelMatcher, RegionGroup};
use tracing::{info, instrument, warn};

use crate::binder::{BindReport, Binder};
use crate::config::MapConfig;
use crate::error::{GeometryError, GeometryResult};
use crate::geometry::GeometrySource;
use crate::model::MapScene;

/// One way of obtaining the map document.
pub trait GeometryLoader {
    /// The geometry this loader produces.
    type Source: GeometrySource;

    /// Name used in log events.
    fn name(&self) -> &str;

    /// Attempt to load.
    fn load(&mut self) -> GeometryResult<Self::Source>;
}

/// A [`GeometryLoader`] backed by a closure.
pub struct FnLoader<F> {
    name: String,
    load: F,
}

impl<F> FnLoader<F> {
    /// Wrap `load` under `name`.
    pub fn new(name: impl Into<String>, load: F) -> Self {
        Self {
            name: name.into(),
            load,
        }
    }
}

impl<F> core::fmt::Debug for FnLoader<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FnLoader")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<G, F> GeometryLoader for FnLoader<F>
where
    G: GeometrySource,
    F: FnMut() -> GeometryResult<G>,
{
    type Source = G;

    fn name(&self) -> &str {
        &self.name
    }

    fn load(&mut self) -> GeometryResult<G> {
        (self.load)()
    }
}

/// A catalog entry shown when there is no interactive map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionButton {
    /// Region id, passed back to select the region.
    pub id: String,
    /// Button caption.
    pub display_name: String,
    /// Natural region, for grouping.
    pub group: RegionGroup,
}

impl RegionButton {
    /// Buttons for the regions matching `group` and `text`, in catalog order.
    pub fn list(catalog: &Catalog, group: Option<RegionGroup>, text: &str) -> Vec<Self> {
        catalog
            .filter(group, text)
            .into_iter()
            .map(|r| Self {
                id: r.id.clone(),
                display_name: r.display_name.clone(),
                group: r.group,
            })
            .collect()
    }
}

/// How the map is shown.
#[derive(Debug)]
pub enum MapPresentation<G: GeometrySource> {
    /// Geometry loaded and bound.
    Interactive {
        /// The bound map.
        scene: MapScene<G>,
        /// Counts from the binding pass.
        report: BindReport,
        /// Loader that produced the geometry.
        loader: String,
    },
    /// No geometry; the catalog as a list of buttons.
    CatalogList(Vec<RegionButton>),
}

impl<G: GeometrySource> MapPresentation<G> {
    /// The bound map, when interactive.
    pub fn scene(&self) -> Option<&MapScene<G>> {
        match self {
            Self::Interactive { scene, .. } => Some(scene),
            Self::CatalogList(_) => None,
        }
    }

    /// The bound map, when interactive.
    pub fn scene_mut(&mut self) -> Option<&mut MapScene<G>> {
        match self {
            Self::Interactive { scene, .. } => Some(scene),
            Self::CatalogList(_) => None,
        }
    }

    /// Whether geometry is available.
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Interactive { .. })
    }
}

/// Try `loaders` in order, binding the first usable geometry.
#[instrument(skip_all, fields(loaders = loaders.len()))]
pub fn present<G: GeometrySource>(
    loaders: &mut [&mut dyn GeometryLoader<Source = G>],
    catalog: &Catalog,
    config: &MapConfig,
) -> MapPresentation<G> {
    for loader in loaders.iter_mut() {
        let name = loader.name().to_owned();
        let source = match loader.load() {
            Ok(source) => source,
            Err(error) => {
                warn!(%error, "geometry loader failed");
                continue;
            }
        };
        let extent = source.extent();
        if extent.width() <= 0.0 || extent.height() <= 0.0 {
            let error = GeometryError::EmptyExtent { strategy: name };
            warn!(%error, "geometry loader produced nothing visible");
            continue;
        }
        let mut scene = MapScene::load(source, &LabelMatcher::new(catalog));
        let report = Binder::new(config).bind_all(&mut scene);
        info!(loader = %name, "interactive map ready");
        return MapPresentation::Interactive {
            scene,
            report,
            loader: name,
        };
    }
    warn!("no geometry available, presenting the catalog list");
    MapPresentation::CatalogList(RegionButton::list(catalog, None, ""))
}
