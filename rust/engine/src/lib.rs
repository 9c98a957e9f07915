// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Layercore Engine
//!
//! The stable facade a caller (CLI, server, GUI — all out of scope for this
//! crate) links against instead of depending on `layercore-processing`
//! directly: [`slice_object`] runs the full nine-stage pipeline and returns
//! the sliced [`PrintObject`] plus any non-fatal [`SliceWarnings`].
//!
//! This crate wires together three lower layers without adding pipeline
//! logic of its own — the lowest layer a caller should ever need.

mod error;

pub use error::{Error, Result};
pub use layercore_geometry::{Facet, IndexedMesh, TriangleMesh};
pub use layercore_processing::SliceWarnings;
pub use layercore_types::{Flow, FlowRole, Placement, PrintConfig, PrintObject, Size, Surface, SurfaceType};

use serde::Serialize;
use tracing::info;

/// Slice one object: build its layer stack from `size`, run every mesh in
/// `meshes` (one per material region, in region order) through the full
/// pipeline, and return the populated object alongside any warnings raised
/// along the way.
pub fn slice_object(config: &PrintConfig, size: Size, meshes: &[&dyn TriangleMesh]) -> Result<(PrintObject, SliceWarnings)> {
    info!(regions = meshes.len(), "slicing object");
    let (object, warnings) = layercore_processing::run(config, size, meshes)?;
    Ok((object, warnings))
}

/// A small, serializable summary of one [`slice_object`] run — enough for
/// a caller to report progress or surface warnings without depending on
/// the full [`PrintObject`] shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SliceReport {
    pub layer_count: usize,
    pub repaired_layers: bool,
    pub empty_result: bool,
}

impl SliceReport {
    pub fn summarize(object: &PrintObject, warnings: SliceWarnings) -> Self {
        Self {
            layer_count: object.layers.len(),
            repaired_layers: warnings.repaired_layers,
            empty_result: warnings.empty_result,
        }
    }
}
