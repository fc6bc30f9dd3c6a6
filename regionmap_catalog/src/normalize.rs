// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Accent- and case-insensitive text keys.
//!
//! Map documents spell the same name in many ways: `"Bogotá"`, `"BOGOTA"`,
//! `"bogota"`, `"Valle  del\nCauca"`, `"valle_del_cauca"`. [`normalize`] folds
//! them onto one key so that catalog ids, display names, aliases and label
//! text compare equal.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Separator used between words of a normalized key.
pub const SEPARATOR: char = '_';

/// Fold text into a comparison key.
///
/// Steps:
/// 1. lowercase;
/// 2. canonical decomposition (NFD) and removal of combining marks;
/// 3. runs of whitespace and underscores collapse into a single [`SEPARATOR`];
/// 4. leading and trailing separators are dropped.
///
/// The result is idempotent: `normalize(&normalize(s)) == normalize(s)`.
///
/// ```
/// use regionmap_catalog::normalize;
///
/// assert_eq!(normalize("  San Andrés y\n Providencia "), "san_andres_y_providencia");
/// assert_eq!(normalize("NORTE__de Santander"), "norte_de_santander");
/// assert_eq!(normalize("Nariño"), "narino");
/// ```
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_separator = false;
    let folded = text
        .chars()
        .flat_map(char::to_lowercase)
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase);
    for c in folded {
        if c.is_whitespace() || c == SEPARATOR {
            pending_separator = !out.is_empty();
            continue;
        }
        if pending_separator {
            out.push(SEPARATOR);
            pending_separator = false;
        }
        out.push(c);
    }
    out
}
