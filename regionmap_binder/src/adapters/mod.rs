// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry sources for concrete scene representations.

#[cfg(feature = "scene_adapter")]
pub mod scene;
