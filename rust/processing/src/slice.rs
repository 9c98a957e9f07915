// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stages 2–4: Facet Slicing, Loop Assembly & Surface Extraction, and Layer
//! Slice Union (`spec.md` §4.2, §4.3, §4.4).

use crate::error::{Error, Result};
use layercore_geometry::{assemble_loops, loops_to_expolygons, slice_mesh, union_ex, TriangleMesh};
use layercore_types::{Layer, PrintObject, Surface, SurfaceType};
use tracing::debug;

/// Intersect every region's mesh against every layer plane, then assemble
/// each layer's segments into typed (initially `Internal`) surfaces.
///
/// `meshes[r]` is the mesh for region `r`; `object.layers` must already be
/// populated by [`crate::construct::construct_layers`].
pub fn slice_object(object: &mut PrintObject, meshes: &[&dyn TriangleMesh]) -> Result<()> {
    let layer_z: Vec<f64> = object.layers.iter().map(|layer| layer.slice_z).collect();

    for (region_id, mesh) in meshes.iter().enumerate() {
        let segments_by_layer = slice_mesh(*mesh, &layer_z);
        for (layer_id, segments) in segments_by_layer {
            if let Some(region) = object
                .layers
                .get_mut(layer_id)
                .and_then(|layer| layer.regions.get_mut(region_id))
            {
                region.lines.get_or_insert_with(Vec::new).extend(segments);
            }
        }
    }

    let any_segments = object.layers.iter().any(|layer| {
        layer
            .regions
            .iter()
            .any(|region| region.lines.as_ref().is_some_and(|lines| !lines.is_empty()))
    });
    if !any_segments {
        return Err(Error::InvalidMesh);
    }

    for layer in object.layers.iter_mut() {
        assemble_layer(layer);
    }
    object.meshes_released = true;

    debug!(layers = object.layers.len(), "facet slicing and loop assembly complete");
    Ok(())
}

fn assemble_layer(layer: &mut Layer) {
    let mut errors = false;
    for region in layer.regions.iter_mut() {
        let segments = region.lines.take().unwrap_or_default();
        let total = segments.len();
        let loops = assemble_loops(&segments);
        let consumed: usize = loops.iter().map(|loop_points| loop_points.len()).sum();
        if consumed < total {
            errors = true;
        }
        let expolygons = loops_to_expolygons(loops);
        region.slices = expolygons
            .into_iter()
            .map(|expolygon| Surface::new(expolygon, SurfaceType::Internal))
            .collect();
    }
    layer.slicing_errors = errors;
    make_slices(layer);
}

/// `spec.md` §4.4: union the per-region slices into the layer's whole-layer
/// islands. Re-run after any stage rewrites region slices (repair, and
/// stage 4's own initial population).
pub fn make_slices(layer: &mut Layer) {
    let mut acc = Vec::new();
    for region in &layer.regions {
        acc = union_ex(&acc, &region.slice_expolygons());
    }
    layer.slices = acc;
}
