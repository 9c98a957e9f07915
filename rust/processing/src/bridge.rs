// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stage 8 (bridge half): Bridge Over Infill (`spec.md` §4.10).

use layercore_geometry::{diff_ex, intersection_ex, union_ex};
use layercore_types::{ExPolygons, Layer, PrintObject, Surface, SurfaceType};
use tracing::debug;

/// Convert internal-solid fill directly over sparse infill into
/// internal-bridge, and thin the infill underneath a bridge so it doesn't
/// interfere with bridge-mode extrusion.
///
/// `bridge_flow_width` isn't one of `spec.md`'s configuration knobs (no
/// dedicated bridge `FlowRole` exists either); the region's solid-infill
/// flow width is used as the closest stand-in, same width class the
/// surface being bridged was going to be filled at anyway.
pub fn bridge_over_infill(object: &mut PrintObject) {
    let layer_count = object.layers.len();
    if layer_count < 2 {
        return;
    }
    let region_count = object.layers[0].regions.len();

    for i in 1..layer_count {
        let internal_below = union_region_fill(&object.layers[i - 1], SurfaceType::Internal, None);
        if internal_below.is_empty() {
            continue;
        }

        for region_id in 0..region_count {
            let internal_solid = union_region_fill(&object.layers[i], SurfaceType::InternalSolid, Some(region_id));
            if internal_solid.is_empty() {
                continue;
            }

            let to_bridge = intersection_ex(&internal_solid, &internal_below);
            if to_bridge.is_empty() {
                continue;
            }

            let remaining_solid = diff_ex(&internal_solid, &to_bridge);

            let region = &mut object.layers[i].regions[region_id];
            let mut rewritten: Vec<Surface> = region
                .fill_surfaces
                .iter()
                .filter(|s| s.surface_type != SurfaceType::InternalSolid)
                .cloned()
                .collect();
            rewritten.extend(remaining_solid.into_iter().map(|e| Surface::new(e, SurfaceType::InternalSolid)));
            rewritten.extend(
                to_bridge
                    .iter()
                    .cloned()
                    .map(|e| Surface::new(e, SurfaceType::InternalBridge).with_bridge_angle(0.0)),
            );
            let bridge_flow_width = region.solid_infill_flow.width;
            region.fill_surfaces = rewritten;

            thin_infill_below(object, i, bridge_flow_width, &to_bridge);
        }
    }

    debug!(layers = layer_count, "bridge-over-infill complete");
}

fn union_region_fill(layer: &Layer, surface_type: SurfaceType, only_region: Option<usize>) -> ExPolygons {
    let surfaces: Vec<&Surface> = match only_region {
        Some(r) => layer.regions[r].fill_surfaces.iter().collect(),
        None => layer.regions.iter().flat_map(|r| r.fill_surfaces.iter()).collect(),
    };
    surfaces
        .into_iter()
        .filter(|s| s.surface_type == surface_type)
        .map(|s| s.expolygon.clone())
        .fold(Vec::new(), |acc, e| union_ex(&acc, &vec![e]))
}

fn thin_infill_below(object: &mut PrintObject, i: usize, bridge_flow_width: f64, to_bridge: &ExPolygons) {
    let layer_height = object.layers[i].height;
    let mut excess = bridge_flow_width - layer_height;
    let mut k = 1;
    while k <= i && excess >= object.layers[i - k].height {
        let below_idx = i - k;
        let below_height = object.layers[below_idx].height;
        for region in object.layers[below_idx].regions.iter_mut() {
            region.fill_surfaces = subtract_from_surfaces(&region.fill_surfaces, to_bridge);
        }
        excess -= below_height;
        k += 1;
    }
}

fn subtract_from_surfaces(surfaces: &[Surface], subtract: &ExPolygons) -> Vec<Surface> {
    let mut result = Vec::new();
    for surface in surfaces {
        let remaining = diff_ex(std::slice::from_ref(&surface.expolygon), subtract);
        for expolygon in remaining {
            let mut kept = surface.clone();
            kept.expolygon = expolygon;
            result.push(kept);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use layercore_types::{ExPolygon, Flow, FlowRole, LayerRegion};

    fn square(side: f64) -> ExPolygon {
        ExPolygon::new(vec![(0.0, 0.0), (side, 0.0), (side, side), (0.0, side)])
    }

    fn layer_with_fill(surfaces: Vec<Surface>, height: f64) -> Layer {
        let mut layer = Layer::new(0, height, height, height, 1);
        let mut region = LayerRegion::new(
            Flow::new(FlowRole::Perimeter, 0.45, height),
            Flow::new(FlowRole::Infill, 0.45, height),
            Flow::new(FlowRole::SolidInfill, 0.45, height),
        );
        region.fill_surfaces = surfaces;
        layer.regions = vec![region];
        layer
    }

    #[test]
    fn internal_solid_over_sparse_infill_becomes_bridge() {
        let mut object = PrintObject::new(Default::default(), vec![Default::default()]);
        object.layers.push(layer_with_fill(
            vec![Surface::new(square(10.0), SurfaceType::Internal)],
            0.2,
        ));
        object.layers.push(layer_with_fill(
            vec![Surface::new(square(10.0), SurfaceType::InternalSolid)],
            0.2,
        ));

        bridge_over_infill(&mut object);

        let top_region = &object.layers[1].regions[0];
        assert!(top_region
            .fill_surfaces
            .iter()
            .any(|s| s.surface_type == SurfaceType::InternalBridge));
        assert!(!top_region
            .fill_surfaces
            .iter()
            .any(|s| s.surface_type == SurfaceType::InternalSolid));
    }

    #[test]
    fn no_sparse_infill_below_leaves_solid_untouched() {
        let mut object = PrintObject::new(Default::default(), vec![Default::default()]);
        object.layers.push(layer_with_fill(Vec::new(), 0.2));
        object.layers.push(layer_with_fill(
            vec![Surface::new(square(10.0), SurfaceType::InternalSolid)],
            0.2,
        ));

        bridge_over_infill(&mut object);

        let top_region = &object.layers[1].regions[0];
        assert!(top_region
            .fill_surfaces
            .iter()
            .any(|s| s.surface_type == SurfaceType::InternalSolid));
    }
}
