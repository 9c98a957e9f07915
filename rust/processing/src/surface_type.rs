// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stage 6: Surface Type Detection (`spec.md` §4.7), plus fill-surface
//! population and Extra Perimeter Hints (`spec.md` §4.8), which share its
//! per-region, per-layer iteration shape.

use layercore_geometry::{area, diff_ex, intersection_ex, is_printable, offset_ex, union_ex, EPSILON};
use layercore_types::{ExPolygon, ExPolygons, PrintConfig, PrintObject, Surface, SurfaceType};
use tracing::debug;

/// Classify every region's slices into TOP/BOTTOM/INTERNAL by comparing
/// against the unions of the neighboring layers, then populate each
/// typed surface's `fill_surfaces` by insetting past the perimeter loops.
pub fn detect_surface_types(object: &mut PrintObject, config: &PrintConfig) {
    let layer_count = object.layers.len();
    if layer_count == 0 {
        return;
    }
    let region_count = object.layers[0].regions.len();

    for i in 0..layer_count {
        let upper_union = if i + 1 < layer_count {
            object.layers[i + 1].slices.clone()
        } else {
            Vec::new()
        };
        let lower_union = if i > 0 { object.layers[i - 1].slices.clone() } else { Vec::new() };

        for region_id in 0..region_count {
            let region = &mut object.layers[i].regions[region_id];
            let width = region.perimeter_flow.width;
            let s: ExPolygons = region.slice_expolygons();

            let mut top = filter_printable(&diff_ex(&s, &upper_union), width);
            let mut bottom = filter_printable(&diff_ex(&s, &lower_union), width);

            if !top.is_empty() && !bottom.is_empty() {
                let overlap = intersection_ex(&top, &bottom);
                if !overlap.is_empty() {
                    top = diff_ex(&top, &overlap);
                }
            }

            let solid = union_ex(&top, &bottom);
            let internal = filter_printable(&diff_ex(&s, &solid), width);

            let mut new_slices = Vec::with_capacity(bottom.len() + top.len() + internal.len());
            new_slices.extend(bottom.into_iter().map(|e| Surface::new(e, SurfaceType::Bottom)));
            new_slices.extend(top.into_iter().map(|e| Surface::new(e, SurfaceType::Top)));
            new_slices.extend(internal.into_iter().map(|e| Surface::new(e, SurfaceType::Internal)));
            region.slices = new_slices;

            populate_fill_surfaces(region, config.perimeters);
        }
    }

    debug!(layers = layer_count, "surface type detection complete");
}

fn filter_printable(polys: &ExPolygons, perimeter_width: f64) -> ExPolygons {
    polys
        .iter()
        .filter(|expolygon| is_printable(std::slice::from_ref(expolygon), perimeter_width))
        .cloned()
        .collect()
}

fn populate_fill_surfaces(region: &mut layercore_types::LayerRegion, perimeters: usize) {
    let spacing = region.perimeter_flow.spacing;
    let inset = perimeters as f64 * spacing;
    let mut fill_surfaces = Vec::new();

    for surface in &region.slices {
        let singleton = vec![surface.expolygon.clone()];
        let boundary = offset_ex(&singleton, -inset).unwrap_or_default();
        let clipped = intersection_ex(&boundary, &singleton);
        for expolygon in clipped {
            let mut fill_surface = Surface::new(expolygon, surface.surface_type);
            fill_surface.bridge_angle = surface.bridge_angle;
            fill_surface.depth_layers = surface.depth_layers;
            fill_surface.additional_inner_perimeters = surface.additional_inner_perimeters;
            fill_surfaces.push(fill_surface);
        }
    }
    region.fill_surfaces = fill_surfaces;
}

/// Runs only when `extra_perimeters`, `perimeters > 0` and `fill_density >
/// 0`: flags slices over a steeply overhanging upper layer for extra
/// inner perimeters.
pub fn extra_perimeter_hints(object: &mut PrintObject, config: &PrintConfig) {
    if !(config.extra_perimeters && config.perimeters > 0 && config.fill_density > 0.0) {
        return;
    }
    let layer_count = object.layers.len();
    if layer_count == 0 {
        return;
    }
    let region_count = object.layers[0].regions.len();

    for region_id in 0..region_count {
        for i in 0..layer_count.saturating_sub(1) {
            let sp = object.layers[i].regions[region_id].perimeter_flow.spacing;
            let upper_slices = object.layers[i + 1].regions[region_id].slice_expolygons();
            if upper_slices.is_empty() {
                continue;
            }
            let grown = offset_ex(&upper_slices, sp).unwrap_or_default();
            let shrunk = offset_ex(&upper_slices, -sp).unwrap_or_default();
            let upper_band = diff_ex(&grown, &shrunk);
            if upper_band.is_empty() {
                continue;
            }

            for surface in object.layers[i].regions[region_id].slices.iter_mut() {
                let base = vec![surface.expolygon.clone()];
                let mut n = config.perimeters + 1;
                loop {
                    let outer = offset_ex(&base, -(((n - 1) as f64) * sp + EPSILON)).unwrap_or_default();
                    let inner = offset_ex(&base, -((n as f64) * sp)).unwrap_or_default();
                    if area(&outer) <= EPSILON || area(&inner) <= EPSILON {
                        break;
                    }
                    let band = diff_ex(&outer, &inner);
                    let band_area = area(&band);
                    if band_area <= EPSILON {
                        break;
                    }
                    let overlap_area = area(&intersection_ex(&band, &upper_band));
                    if overlap_area < 0.2 * band_area {
                        break;
                    }
                    surface.additional_inner_perimeters += 1;
                    n += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slice::slice_object;
    use crate::test_support::single_region_object;
    use layercore_geometry::IndexedMesh;

    #[test]
    fn middle_layer_of_a_cube_has_no_top_or_bottom() {
        let config = PrintConfig::default();
        let cube = IndexedMesh::cuboid(10.0, 10.0, 10.0);
        let mut object = single_region_object(&config, 10.0);
        slice_object(&mut object, &[&cube]).unwrap();
        detect_surface_types(&mut object, &config);

        let mid = object.layers.len() / 2;
        let region = &object.layers[mid].regions[0];
        assert!(region.slices.iter().all(|s| s.surface_type == SurfaceType::Internal));
    }

    #[test]
    fn first_layer_has_a_bottom_surface() {
        let config = PrintConfig::default();
        let cube = IndexedMesh::cuboid(10.0, 10.0, 10.0);
        let mut object = single_region_object(&config, 10.0);
        slice_object(&mut object, &[&cube]).unwrap();
        detect_surface_types(&mut object, &config);

        let region = &object.layers[0].regions[0];
        assert!(region.slices.iter().any(|s| s.surface_type == SurfaceType::Bottom));
    }

    #[test]
    fn extra_perimeters_disabled_by_default() {
        let config = PrintConfig::default();
        let cube = IndexedMesh::cuboid(10.0, 10.0, 10.0);
        let mut object = single_region_object(&config, 10.0);
        slice_object(&mut object, &[&cube]).unwrap();
        detect_surface_types(&mut object, &config);
        extra_perimeter_hints(&mut object, &config);

        let total: usize = object
            .layers
            .iter()
            .flat_map(|l| l.regions.iter())
            .flat_map(|r| r.slices.iter())
            .map(|s| s.additional_inner_perimeters)
            .sum();
        assert_eq!(total, 0);
    }
}
