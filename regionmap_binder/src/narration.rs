// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spoken descriptions of a selected region.
//!
//! Speech synthesis belongs to the host; this module only builds what to say
//! and defines the [`Narrator`] seam the selection controller speaks through.

use core::fmt::Write as _;

use regionmap_catalog::Region;

/// Language tag of every utterance.
pub const NARRATION_LANGUAGE: &str = "es-CO";

/// Text to be spoken, with its language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Utterance {
    /// What to say.
    pub text: String,
    /// BCP 47 language tag.
    pub language: &'static str,
}

impl Utterance {
    /// Describe `region`: name, capital, group, then population and suggested
    /// activities when available.
    ///
    /// ```
    /// use regionmap_binder::narration::Utterance;
    /// use regionmap_catalog::{Region, RegionGroup};
    ///
    /// let meta = Region::new("meta", "Meta", "Villavicencio", RegionGroup::Orinoquia)
    ///     .with_population(1_100_000);
    /// let u = Utterance::for_region(&meta);
    /// assert!(u.text.starts_with("Meta. Capital: Villavicencio. Región: Orinoquía. "));
    /// assert!(u.text.contains("Población aproximada: 1.100.000. "));
    /// assert_eq!(u.language, "es-CO");
    /// ```
    pub fn for_region(region: &Region) -> Self {
        let mut text = format!(
            "{}. Capital: {}. Región: {}. ",
            region.display_name, region.capital, region.group
        );
        if let Some(population) = region.population {
            let _ = write!(text, "Población aproximada: {}. ", group_digits(population));
        }
        let activities = region.group.activities();
        if !activities.is_empty() {
            let _ = write!(text, "Actividades sugeridas: {}.", activities.join("; "));
        }
        let len = text.trim_end().len();
        text.truncate(len);
        Self {
            text,
            language: NARRATION_LANGUAGE,
        }
    }
}

/// Format with `.` as the thousands separator, as Colombian Spanish does.
pub fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Speech output. Speaking cancels whatever was still being said.
pub trait Narrator {
    /// Stop any utterance in progress.
    fn cancel(&mut self);

    /// Start speaking.
    fn speak(&mut self, utterance: &Utterance);
}

/// A narrator that says nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct Silent;

impl Narrator for Silent {
    fn cancel(&mut self) {}

    fn speak(&mut self, _utterance: &Utterance) {}
}

impl<N: Narrator + ?Sized> Narrator for &mut N {
    fn cancel(&mut self) {
        (**self).cancel();
    }

    fn speak(&mut self, utterance: &Utterance) {
        (**self).speak(utterance);
    }
}
