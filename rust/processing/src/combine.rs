// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stage 8 (combine half): Combine Infill (`spec.md` §4.12).

use layercore_geometry::{area, diff_ex, intersection_ex, offset_ex, union_ex};
use layercore_types::{ExPolygons, FillPattern, PrintConfig, PrintObject, Surface, SurfaceType};
use tracing::debug;

/// Runs only when `infill_every_layers > 1` and `fill_density > 0`:
/// merges sparse/solid fill across groups of consecutive layers so a
/// single thicker infill pass can stand in for several thin ones.
pub fn combine_infill(object: &mut PrintObject, config: &PrintConfig) {
    if !(config.infill_every_layers > 1 && config.fill_density > 0.0) {
        return;
    }
    let layer_count = object.layers.len();
    if layer_count == 0 {
        return;
    }
    let region_count = object.layers[0].regions.len();
    let every = combine_every(config);
    if every <= 1 {
        return;
    }

    for region_id in 0..region_count {
        let mut end = every;
        while end < layer_count {
            let start = end + 1 - every;
            for surface_type in [SurfaceType::Internal, SurfaceType::InternalSolid] {
                combine_group(object, config, region_id, start, end, surface_type);
            }
            end += every;
        }
    }

    debug!(layers = layer_count, every, "combine-infill complete");
}

fn combine_every(config: &PrintConfig) -> usize {
    let nozzle_cap = ((config.nozzle_diameter / config.layer_height).floor().max(1.0)) as usize;
    config.infill_every_layers.min(nozzle_cap)
}

fn combine_group(
    object: &mut PrintObject,
    config: &PrintConfig,
    region_id: usize,
    start: usize,
    end: usize,
    surface_type: SurfaceType,
) {
    let mut intersection: Option<ExPolygons> = None;
    for i in start..=end {
        let layer_surfaces = union_of_type(object, i, region_id, surface_type);
        intersection = Some(match intersection {
            None => layer_surfaces,
            Some(acc) => intersection_ex(&acc, &layer_surfaces),
        });
        if intersection.as_ref().unwrap().is_empty() {
            return;
        }
    }
    let mut combined = intersection.unwrap_or_default();

    let threshold = object.layers[start].regions[region_id].infill_area_threshold;
    combined.retain(|e| area(std::slice::from_ref(e)) >= threshold);
    if combined.is_empty() {
        return;
    }

    let infill_flow = object.layers[end].regions[region_id].infill_flow;
    let perimeter_flow = object.layers[end].regions[region_id].perimeter_flow;
    let mut clearance = infill_flow.width / 2.0 + perimeter_flow.width / 2.0;
    let overlapping_pattern = matches!(config.fill_pattern, FillPattern::Rectilinear | FillPattern::Honeycomb);
    if overlapping_pattern || surface_type == SurfaceType::InternalSolid {
        clearance += infill_flow.spacing * 0.2;
    }
    let with_clearance = offset_ex(&combined, clearance).unwrap_or_default();

    for i in start..=end {
        let region = &mut object.layers[i].regions[region_id];
        let kept_elsewhere: Vec<Surface> = region
            .fill_surfaces
            .iter()
            .filter(|s| s.surface_type != surface_type)
            .cloned()
            .collect();
        let this_layer_area = region
            .fill_surfaces
            .iter()
            .filter(|s| s.surface_type == surface_type)
            .map(|s| s.expolygon.clone())
            .fold(Vec::new(), |acc, e| union_ex(&acc, &vec![e]));

        let mut rewritten = kept_elsewhere;
        let thinned = diff_ex(&this_layer_area, &with_clearance);
        rewritten.extend(thinned.into_iter().map(|e| Surface::new(e, surface_type)));

        if i == end {
            let depth = end - start + 1;
            rewritten.extend(
                combined
                    .iter()
                    .cloned()
                    .map(|e| Surface::new(e, surface_type).with_depth_layers(depth)),
            );
        }
        region.fill_surfaces = rewritten;
    }
}

fn union_of_type(object: &PrintObject, layer_id: usize, region_id: usize, surface_type: SurfaceType) -> ExPolygons {
    object.layers[layer_id].regions[region_id]
        .fill_surfaces
        .iter()
        .filter(|s| s.surface_type == surface_type)
        .map(|s| s.expolygon.clone())
        .fold(Vec::new(), |acc, e| union_ex(&acc, &vec![e]))
}
