// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label Matcher: label text → catalog region.
//!
//! ## Split names
//!
//! Map documents often break a long name over two text runs, in either order
//! relative to the run being resolved (`"San Andrés y"` followed by
//! `"Providencia"`). [`LabelMatcher::resolve_with_neighbors`] therefore tries,
//! in order:
//!
//! 1. the text followed by the next run,
//! 2. the previous run followed by the text,
//! 3. the text alone.
//!
//! The single run comes last so that `"Norte de"` + `"Santander"` resolves to
//! Norte de Santander even though `"Santander"` alone is a region too.

use crate::catalog::Catalog;
use crate::normalize::normalize;
use crate::region::Region;

/// Resolves label text against a catalog. Pure: equal inputs give equal results.
#[derive(Copy, Clone, Debug)]
pub struct LabelMatcher<'a> {
    catalog: &'a Catalog,
}

impl<'a> LabelMatcher<'a> {
    /// Create a matcher over `catalog`.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// The catalog this matcher resolves against.
    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Resolve a single piece of text. `None` is a normal outcome for
    /// decorative or unrelated text.
    pub fn resolve(&self, raw_text: &str) -> Option<&'a Region> {
        self.catalog.find_normalized(&normalize(raw_text))
    }

    /// Resolve a label that may be one half of a split name.
    ///
    /// `next` and `previous` are the texts of the adjacent text runs, when the
    /// neighbouring elements are text runs at all. Blank neighbours are ignored.
    ///
    /// ```
    /// use regionmap_catalog::{Catalog, LabelMatcher};
    ///
    /// let catalog = Catalog::colombia();
    /// let m = LabelMatcher::new(&catalog);
    /// let region = m.resolve_with_neighbors("Providencia", None, Some("San Andrés y"));
    /// assert_eq!(region.unwrap().id, "san_andres");
    /// ```
    pub fn resolve_with_neighbors(
        &self,
        raw_text: &str,
        next: Option<&str>,
        previous: Option<&str>,
    ) -> Option<&'a Region> {
        let text = raw_text.trim();
        let next = next.map(str::trim).filter(|t| !t.is_empty());
        let previous = previous.map(str::trim).filter(|t| !t.is_empty());

        next.and_then(|n| self.resolve(&format!("{text} {n}")))
            .or_else(|| previous.and_then(|p| self.resolve(&format!("{p} {text}"))))
            .or_else(|| self.resolve(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::RegionGroup;
    use proptest::prelude::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Region::new(
                "san_andres",
                "San Andrés",
                "San Andrés",
                RegionGroup::Insular,
            )
            .with_alias("san_andres_y_providencia"),
            Region::new("santander", "Santander", "Bucaramanga", RegionGroup::Andina),
            Region::new(
                "norte_santander",
                "Norte de Santander",
                "Cúcuta",
                RegionGroup::Andina,
            ),
        ])
        .unwrap()
    }

    #[test]
    fn split_name_resolves_in_either_order() {
        let cat = catalog();
        let m = LabelMatcher::new(&cat);
        let first = m.resolve_with_neighbors("San Andrés y", Some("Providencia"), None);
        let second = m.resolve_with_neighbors("Providencia", None, Some("San Andrés y"));
        assert_eq!(first.unwrap().id, "san_andres");
        assert_eq!(second.unwrap().id, "san_andres");
    }

    #[test]
    fn split_name_parts_alone_do_not_resolve() {
        let cat = catalog();
        let m = LabelMatcher::new(&cat);
        assert!(m.resolve("San Andrés y").is_none());
        assert!(m.resolve("Providencia").is_none());
    }

    #[test]
    fn combination_beats_single_text() {
        let cat = catalog();
        let m = LabelMatcher::new(&cat);
        let r = m.resolve_with_neighbors("Santander", None, Some("Norte de"));
        assert_eq!(r.unwrap().id, "norte_santander");
        // Without a neighbour, the single run still resolves.
        assert_eq!(
            m.resolve_with_neighbors("Santander", None, None).unwrap().id,
            "santander"
        );
    }

    #[test]
    fn unrelated_neighbours_fall_back_to_single_text() {
        let cat = catalog();
        let m = LabelMatcher::new(&cat);
        let r = m.resolve_with_neighbors("Santander", Some("Mar Caribe"), Some("  "));
        assert_eq!(r.unwrap().id, "santander");
        assert!(m.resolve_with_neighbors("Océano", Some("Pacífico"), None).is_none());
    }

    proptest! {
        #[test]
        fn resolve_is_deterministic(text in "[A-Za-zéá ]{0,24}", next in proptest::option::of("[A-Za-z ]{0,12}")) {
            let cat = catalog();
            let m = LabelMatcher::new(&cat);
            let a = m.resolve_with_neighbors(&text, next.as_deref(), None).map(|r| r.id.clone());
            let b = m.resolve_with_neighbors(&text, next.as_deref(), None).map(|r| r.id.clone());
            prop_assert_eq!(a, b);
        }
    }
}
