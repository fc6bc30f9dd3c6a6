// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for the binding, selection and persistence layers.
//!
//! Only genuine failures live here. An unresolved label, an unbound shape or a
//! click that finds no shape are ordinary outcomes and are reported through
//! return values and `tracing` events instead.

use std::io;
use std::path::PathBuf;

use regionmap_catalog::CatalogError;
use thiserror::Error;

/// Configuration loading and validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The document is not valid TOML for [`MapConfig`](crate::MapConfig).
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is out of range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Selection persistence failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("store I/O error: {0}")]
    Io(#[from] io::Error),

    /// A stored value is not valid JSON for its type.
    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backing file exists but does not hold a JSON object.
    #[error("store file {0} does not contain a JSON object")]
    NotAnObject(PathBuf),
}

/// Reasons a geometry loading strategy produced nothing usable.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// The document could not be fetched or parsed.
    #[error("geometry unavailable via {strategy}: {reason}")]
    Unavailable {
        /// Loader that failed.
        strategy: String,
        /// Human-readable cause.
        reason: String,
    },

    /// The document loaded but rendered with a zero-size extent.
    #[error("geometry loaded via {strategy} but has an empty extent")]
    EmptyExtent {
        /// Loader whose output was empty.
        strategy: String,
    },
}

/// Umbrella error for hosts that wire the whole map together.
#[derive(Debug, Error)]
pub enum MapError {
    /// See [`CatalogError`].
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// See [`ConfigError`].
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// See [`StoreError`].
    #[error(transparent)]
    Store(#[from] StoreError),

    /// See [`GeometryError`].
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for selection stores.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for geometry loaders.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Result type for host-level map wiring.
pub type MapResult<T> = Result<T, MapError>;
