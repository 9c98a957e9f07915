// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Top-level orchestrator: runs all nine stages in the strict top-down
//! order §5 describes and collects the non-fatal warnings §7 describes.

use crate::bridge::bridge_over_infill;
use crate::clip_fill::clip_fill_where_needed;
use crate::combine::combine_infill;
use crate::construct::{construct_layers, prune_trailing_empty_layer};
use crate::error::Result;
use crate::repair::repair_layers;
use crate::shells::discover_horizontal_shells;
use crate::slice::slice_object;
use crate::support::generate_support_material;
use crate::surface_type::{detect_surface_types, extra_perimeter_hints};
use crate::trim::trim_empty_prefix;
use layercore_geometry::TriangleMesh;
use layercore_types::{Placement, PrintConfig, PrintObject, Size};
use tracing::warn;

/// Non-fatal conditions the pipeline can surface without failing the run
/// (`spec.md` §7: `SlicingError` and `EmptyResult` are "non-fatal,
/// flagged", not `Result::Err`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SliceWarnings {
    /// At least one layer's loop assembly failed topologically and was
    /// repaired from its neighbors (stage 4). A single warning covers the
    /// whole run, per `spec.md` §4.5.
    pub repaired_layers: bool,
    /// Empty-prefix trim left the object with zero layers; no stage past
    /// trim ran (`spec.md` §7 `EmptyResult`).
    pub empty_result: bool,
}

/// Run the full nine-stage pipeline for one object: construct its layer
/// stack, slice `meshes` (one per material region) into it, and carry the
/// result through repair, trim, typing, shells, bridge/clip/combine, and
/// support material generation.
pub fn run(config: &PrintConfig, size: Size, meshes: &[&dyn TriangleMesh]) -> Result<(PrintObject, SliceWarnings)> {
    let mut object = PrintObject::new(size, vec![Placement::default()]);
    object.layers = construct_layers(config, size.z, meshes.len());

    slice_object(&mut object, meshes)?;
    prune_trailing_empty_layer(&mut object);

    let repaired_layers = object.layers.iter().any(|l| l.slicing_errors);
    repair_layers(&mut object);

    let mut warnings = SliceWarnings {
        repaired_layers,
        empty_result: false,
    };

    if trim_empty_prefix(&mut object, config) {
        warnings.empty_result = true;
        warn!("object sliced to an empty layer stack, skipping remaining stages");
        return Ok((object, warnings));
    }

    detect_surface_types(&mut object, config);
    extra_perimeter_hints(&mut object, config);
    discover_horizontal_shells(&mut object, config);
    bridge_over_infill(&mut object);
    clip_fill_where_needed(&mut object, config);
    combine_infill(&mut object, config);
    generate_support_material(&mut object, config);

    Ok((object, warnings))
}
