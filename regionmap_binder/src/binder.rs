// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape-Region Binder: decides, once per loaded map, which region each shape
//! stands for.
//!
//! ## Pass structure
//!
//! Shapes already carrying an assignment (a region hint from the document, or
//! a previous pass) are left alone. Every other shape goes through:
//!
//! 1. the candidate filter (filled, large enough);
//! 2. enclave exclusion: shapes centered inside the padded inset rectangle of
//!    the enclave region are skipped, and labels wholly inside it are ignored;
//! 3. the ordered [`BindStage::GENERAL_PASS`] stages. The first stage that
//!    yields a region wins.
//!
//! Enclosure pairs add an eligibility rule to both stages: a label of the
//! enclosed region cannot claim a shape above the pair's area ceiling, and a
//! label of the surrounding region cannot claim one below its area floor.
//!
//! A shape left unbound is not an error. It simply never highlights on its own.

use kurbo::{Point, Rect};
use tracing::{debug, info, instrument, trace};

use crate::config::MapConfig;
use crate::geometry::GeometrySource;
use crate::model::{LabelIdx, MapScene, Shape, ShapeIdx};

/// How a shape came to be bound.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BindStage {
    /// The document already named the region on the shape.
    Preassigned,
    /// A region label lies inside the shape's fill.
    HitTest,
    /// The nearest region label is close enough to the shape's center.
    NearestLabel,
}

impl BindStage {
    /// Stages of the general pass, in evaluation order.
    pub const GENERAL_PASS: [Self; 2] = [Self::HitTest, Self::NearestLabel];

    /// Name used in log events.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preassigned => "preassigned",
            Self::HitTest => "hit_test",
            Self::NearestLabel => "nearest_label",
        }
    }
}

/// Counts from one binding pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BindReport {
    /// Shapes that already had a region before the pass.
    pub already_assigned: usize,
    /// Shapes bound because a label lies in their fill.
    pub by_hit_test: usize,
    /// Shapes bound to a nearby label.
    pub by_nearest_label: usize,
    /// Shapes rejected by the candidate filter.
    pub not_candidates: usize,
    /// Candidate shapes centered inside the enclave rectangle.
    pub excluded_by_enclave: usize,
    /// Candidate shapes no stage could bind.
    pub unbound: usize,
    /// The enclave rectangle in effect, if any.
    pub enclave: Option<Rect>,
}

impl BindReport {
    /// Shapes bound by this pass.
    pub fn newly_bound(&self) -> usize {
        self.by_hit_test + self.by_nearest_label
    }
}

/// Runs the binding pass over a [`MapScene`].
#[derive(Copy, Clone, Debug)]
pub struct Binder<'c> {
    config: &'c MapConfig,
}

impl<'c> Binder<'c> {
    /// Create a binder with the given tuning.
    pub fn new(config: &'c MapConfig) -> Self {
        Self { config }
    }

    /// Bind every unassigned shape of `scene`.
    ///
    /// Assignments only ever go from none to some, so running the pass again
    /// changes nothing.
    #[instrument(skip_all, fields(shapes = scene.shapes().len(), labels = scene.labels().len()))]
    pub fn bind_all<G: GeometrySource>(&self, scene: &mut MapScene<G>) -> BindReport {
        let enclave = self.enclave_rect(scene);
        scene.set_enclave(enclave);
        let mut report = BindReport {
            enclave,
            ..BindReport::default()
        };

        let labels: Vec<LabelIdx> = (0..scene.labels().len())
            .map(LabelIdx)
            .filter(|&idx| {
                scene.label(idx).is_some_and(|l| {
                    l.resolved_region().is_some()
                        && enclave.is_none_or(|r| !r.contains_rect(l.bounds()))
                })
            })
            .collect();

        for i in 0..scene.shapes().len() {
            let idx = ShapeIdx(i);
            let shape = &scene.shapes()[i];
            if shape.assigned_region().is_some() {
                report.already_assigned += 1;
                continue;
            }
            if !self.config.candidate.admits(shape.is_filled(), shape.bounds()) {
                report.not_candidates += 1;
                continue;
            }
            if scene.in_enclave(shape.center()) {
                trace!(shape = i, "inside enclave, skipped");
                report.excluded_by_enclave += 1;
                continue;
            }

            let decision = BindStage::GENERAL_PASS
                .into_iter()
                .find_map(|stage| self.evaluate(stage, scene, shape, &labels).map(|r| (stage, r)));

            match decision {
                Some((stage, region)) => {
                    debug!(shape = i, region = %region, stage = stage.as_str(), "shape bound");
                    scene.shape_mut(idx).assign(&region, stage);
                    match stage {
                        BindStage::HitTest => report.by_hit_test += 1,
                        BindStage::NearestLabel => report.by_nearest_label += 1,
                        BindStage::Preassigned => {}
                    }
                }
                None => {
                    trace!(shape = i, "no stage bound the shape");
                    report.unbound += 1;
                }
            }
        }

        info!(
            bound = report.newly_bound(),
            unbound = report.unbound,
            already_assigned = report.already_assigned,
            "binding pass complete"
        );
        report
    }

    /// The padded bounds of every label naming the enclave region.
    pub fn enclave_rect<G: GeometrySource>(&self, scene: &MapScene<G>) -> Option<Rect> {
        let region = self.config.enclave.region.as_deref()?;
        let pad = self.config.enclave.padding;
        scene
            .labels()
            .iter()
            .filter(|l| l.resolved_region() == Some(region))
            .map(|l| l.bounds())
            .reduce(|a, b| a.union(b))
            .map(|r| r.inflate(pad, pad))
    }

    fn evaluate<G: GeometrySource>(
        &self,
        stage: BindStage,
        scene: &MapScene<G>,
        shape: &Shape<G::ElementId>,
        labels: &[LabelIdx],
    ) -> Option<String> {
        let eligible = labels.iter().filter_map(|&idx| {
            let label = scene.label(idx)?;
            let region = label.resolved_region()?;
            self.config
                .area_admits(region, shape.area())
                .then(|| (region, label.position()))
        });

        match stage {
            BindStage::HitTest => {
                let containment = scene.source().point_containment()?;
                eligible
                    .into_iter()
                    .find(|(_, pos)| containment.contains_point(shape.element(), *pos))
                    .map(|(region, _)| region.to_owned())
            }
            BindStage::NearestLabel => {
                let (region, distance) = nearest(shape.center(), eligible)?;
                let threshold = self.config.binding.threshold(region, shape.max_dimension());
                if distance <= threshold {
                    Some(region.to_owned())
                } else {
                    trace!(region, distance, threshold, "nearest label too far");
                    None
                }
            }
            BindStage::Preassigned => None,
        }
    }
}

/// The closest of `candidates` to `from`; ties go to the earliest.
pub(crate) fn nearest<T>(
    from: Point,
    candidates: impl IntoIterator<Item = (T, Point)>,
) -> Option<(T, f64)> {
    let mut best: Option<(T, f64)> = None;
    for (item, pos) in candidates {
        let d = from.distance(pos);
        if best.as_ref().is_none_or(|(_, b)| d < *b) {
            best = Some((item, d));
        }
    }
    best
}
