// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for catalog construction.

use thiserror::Error;

/// Reasons a list of regions cannot form a catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A region id normalizes to the empty string.
    #[error("region id {0:?} is empty after normalization")]
    EmptyId(String),

    /// Two regions share an id.
    #[error("duplicate region id {0:?}")]
    DuplicateId(String),

    /// Two regions have display names that normalize identically.
    #[error("display names of {first:?} and {second:?} both normalize to {key:?}")]
    DuplicateDisplayName {
        /// Id of the region that claimed the name first.
        first: String,
        /// Id of the conflicting region.
        second: String,
        /// The shared normalized key.
        key: String,
    },
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
