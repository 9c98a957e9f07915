// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stage 7: Horizontal Shell Discovery (`spec.md` §4.9).

use layercore_geometry::{area, diff_ex, intersection_ex, union_ex};
use layercore_types::{ExPolygons, LayerRegion, PrintConfig, PrintObject, Surface, SurfaceType};
use tracing::debug;

pub fn discover_horizontal_shells(object: &mut PrintObject, config: &PrintConfig) {
    let layer_count = object.layers.len();
    if layer_count == 0 {
        return;
    }
    let region_count = object.layers[0].regions.len();

    for region_id in 0..region_count {
        if config.solid_infill_every_layers > 0 {
            for i in (0..layer_count).step_by(config.solid_infill_every_layers) {
                retype_internal_to_solid(&mut object.layers[i].regions[region_id]);
            }
        }

        for i in 0..layer_count {
            for seed in [SurfaceType::Bottom, SurfaceType::Top] {
                sweep_from_seed(object, config, region_id, i, seed, layer_count);
            }
        }

        for layer in object.layers.iter_mut() {
            let region = &mut layer.regions[region_id];
            let threshold = region.infill_area_threshold;
            region
                .fill_surfaces
                .retain(|s| area(std::slice::from_ref(&s.expolygon)) >= threshold);
            if config.fill_density <= 0.0 {
                region.fill_surfaces.retain(|s| s.surface_type != SurfaceType::Internal);
            }
        }
    }

    debug!(layers = layer_count, "horizontal shell discovery complete");
}

fn sweep_from_seed(
    object: &mut PrintObject,
    config: &PrintConfig,
    region_id: usize,
    i: usize,
    seed: SurfaceType,
    layer_count: usize,
) {
    let solid_layers = match seed {
        SurfaceType::Bottom => config.bottom_solid_layers,
        SurfaceType::Top => config.top_solid_layers,
        _ => return,
    };
    if solid_layers == 0 {
        return;
    }
    let upward = seed == SurfaceType::Bottom;

    let seed_projection: ExPolygons = object.layers[i].regions[region_id]
        .slices
        .iter()
        .filter(|s| s.surface_type == seed)
        .map(|s| s.expolygon.clone())
        .collect();
    if seed_projection.is_empty() {
        return;
    }

    for n in 1..=solid_layers.saturating_sub(1) {
        let neighbor = if upward {
            let idx = i + n;
            (idx < layer_count).then_some(idx)
        } else {
            i.checked_sub(n)
        };
        let Some(neighbor) = neighbor else { break };

        let new_solid = {
            let region = &object.layers[neighbor].regions[region_id];
            let internal_and_solid: ExPolygons = region
                .fill_surfaces
                .iter()
                .filter(|s| matches!(s.surface_type, SurfaceType::Internal | SurfaceType::InternalSolid))
                .map(|s| s.expolygon.clone())
                .collect();
            intersection_ex(&seed_projection, &internal_and_solid)
        };
        if new_solid.is_empty() {
            break;
        }

        rewrite_region_shell(&mut object.layers[neighbor].regions[region_id], &new_solid);
    }
}

fn retype_internal_to_solid(region: &mut LayerRegion) {
    for surface in region.fill_surfaces.iter_mut() {
        if surface.surface_type == SurfaceType::Internal {
            surface.surface_type = SurfaceType::InternalSolid;
        }
    }
}

/// Rewrite one neighbor region's fill surfaces per `spec.md` §4.9: the new
/// solid area wins over INTERNAL, the remainder of INTERNAL stays
/// INTERNAL, and TOP/BOTTOM surfaces are clipped to keep the partition.
fn rewrite_region_shell(region: &mut LayerRegion, new_solid: &ExPolygons) {
    let existing_solid: ExPolygons = region
        .fill_surfaces
        .iter()
        .filter(|s| s.surface_type == SurfaceType::InternalSolid)
        .map(|s| s.expolygon.clone())
        .collect();
    let combined_solid = union_ex(&existing_solid, new_solid);

    let existing_internal: ExPolygons = region
        .fill_surfaces
        .iter()
        .filter(|s| s.surface_type == SurfaceType::Internal)
        .map(|s| s.expolygon.clone())
        .collect();
    let new_internal = diff_ex(&existing_internal, &combined_solid);
    let claimed = union_ex(&combined_solid, &new_internal);

    let mut rewritten = Vec::new();
    for surface in region.fill_surfaces.iter() {
        match surface.surface_type {
            SurfaceType::Internal | SurfaceType::InternalSolid => {}
            SurfaceType::Top | SurfaceType::Bottom => {
                let remaining = diff_ex(std::slice::from_ref(&surface.expolygon), &claimed);
                for expolygon in remaining {
                    let mut kept = surface.clone();
                    kept.expolygon = expolygon;
                    rewritten.push(kept);
                }
            }
            SurfaceType::InternalBridge => rewritten.push(surface.clone()),
        }
    }
    rewritten.extend(new_internal.into_iter().map(|e| Surface::new(e, SurfaceType::Internal)));
    rewritten.extend(combined_solid.into_iter().map(|e| Surface::new(e, SurfaceType::InternalSolid)));
    region.fill_surfaces = rewritten;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slice::slice_object;
    use crate::surface_type::detect_surface_types;
    use crate::test_support::single_region_object;
    use layercore_geometry::IndexedMesh;

    #[test]
    fn layers_near_the_top_gain_internal_solid_fill() {
        let config = PrintConfig {
            top_solid_layers: 3,
            bottom_solid_layers: 2,
            fill_density: 0.2,
            ..PrintConfig::default()
        };
        let cube = IndexedMesh::cuboid(10.0, 10.0, 4.0);
        let mut object = single_region_object(&config, 4.0);
        slice_object(&mut object, &[&cube]).unwrap();
        detect_surface_types(&mut object, &config);
        discover_horizontal_shells(&mut object, &config);

        let last = object.layers.len() - 1;
        let region = &object.layers[last - 1].regions[0];
        assert!(region
            .fill_surfaces
            .iter()
            .any(|s| s.surface_type == SurfaceType::InternalSolid));
    }

    #[test]
    fn zero_fill_density_drops_internal_surfaces() {
        let config = PrintConfig {
            fill_density: 0.0,
            ..PrintConfig::default()
        };
        let cube = IndexedMesh::cuboid(10.0, 10.0, 4.0);
        let mut object = single_region_object(&config, 4.0);
        slice_object(&mut object, &[&cube]).unwrap();
        detect_surface_types(&mut object, &config);
        discover_horizontal_shells(&mut object, &config);

        assert!(object
            .layers
            .iter()
            .flat_map(|l| l.regions.iter())
            .flat_map(|r| r.fill_surfaces.iter())
            .all(|s| s.surface_type != SurfaceType::Internal));
    }
}
