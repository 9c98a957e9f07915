// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stage 8 (clip half): Clip Fill Surfaces Where Needed (`spec.md` §4.11).

use layercore_geometry::{intersection_ex, offset_ex, union_ex};
use layercore_types::{ExPolygons, PrintConfig, PrintObject, Surface, SurfaceType};
use tracing::debug;

/// Small additional margin grown onto the accumulated overhang area each
/// layer, matching the original engine's "0.5 ensures the paths don't get
/// clipped externally" comment (`spec.md` §9 Open Questions) — kept as a
/// named constant rather than a magic number so the rationale travels
/// with the value.
pub const OVERHANG_MARGIN: f64 = 0.5;

/// Runs only when `infill_only_where_needed`: sweeping top-down per
/// region, keep only the sparse infill that actually has to support an
/// overhang above it, clipping away the rest.
pub fn clip_fill_where_needed(object: &mut PrintObject, config: &PrintConfig) {
    if !config.infill_only_where_needed {
        return;
    }
    let layer_count = object.layers.len();
    if layer_count == 0 {
        return;
    }
    let region_count = object.layers[0].regions.len();

    for region_id in 0..region_count {
        let mut overhangs: ExPolygons = Vec::new();

        for i in (0..layer_count).rev() {
            {
                let region = &mut object.layers[i].regions[region_id];
                let internal: ExPolygons = region
                    .fill_surfaces
                    .iter()
                    .filter(|s| s.surface_type == SurfaceType::Internal)
                    .map(|s| s.expolygon.clone())
                    .collect();
                let clipped = intersection_ex(&internal, &overhangs);
                region.fill_surfaces.retain(|s| s.surface_type != SurfaceType::Internal);
                region
                    .fill_surfaces
                    .extend(clipped.into_iter().map(|e| Surface::new(e, SurfaceType::Internal)));
            }

            if i == 0 {
                break;
            }

            let region = &object.layers[i].regions[region_id];
            let non_internal: ExPolygons = region
                .fill_surfaces
                .iter()
                .filter(|s| s.surface_type != SurfaceType::Internal)
                .map(|s| s.expolygon.clone())
                .collect();
            let overhang_width = region.overhang_width;
            let lower_slices = object.layers[i - 1].slices.clone();
            let shrunk_lower = offset_ex(&lower_slices, -overhang_width).unwrap_or_default();
            let new_overhang = intersection_ex(&non_internal, &shrunk_lower);
            let grown = offset_ex(&new_overhang, OVERHANG_MARGIN).unwrap_or_default();
            overhangs = union_ex(&overhangs, &grown);
        }
    }

    debug!(layers = layer_count, "fill clipping complete");
}
