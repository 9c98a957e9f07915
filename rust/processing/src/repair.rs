// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stage 4: Slice Repair (`spec.md` §4.5).

use crate::slice::make_slices;
use layercore_geometry::{diff_ex, union_ex};
use layercore_types::{ExPolygon, Layer, PrintObject, Surface, SurfaceType};
use tracing::warn;

/// Reconstruct every layer flagged `slicing_errors` from its nearest
/// error-free neighbors, searching outward in both directions. Warns once
/// (not once per layer) if any repair happened.
pub fn repair_layers(object: &mut PrintObject) {
    let layer_count = object.layers.len();
    let mut any_repaired = false;

    for i in 0..layer_count {
        if !object.layers[i].slicing_errors {
            continue;
        }
        let upper = find_nearest(&object.layers, i, layer_count, true);
        let lower = find_nearest(&object.layers, i, layer_count, false);
        let (Some(upper), Some(lower)) = (upper, lower) else {
            // No error-free neighbor on one side: nothing sound to repair
            // from. Leave the layer flagged rather than fabricate geometry.
            continue;
        };

        let region_count = object.layers[i].regions.len();
        for region_id in 0..region_count {
            let mut outer_contours = Vec::new();
            let mut hole_contours = Vec::new();
            for &neighbor in &[upper, lower] {
                for surface in &object.layers[neighbor].regions[region_id].slices {
                    outer_contours.push(ExPolygon::new(surface.expolygon.outer.clone()));
                    for hole in &surface.expolygon.holes {
                        hole_contours.push(ExPolygon::new(hole.clone()));
                    }
                }
            }
            let union_outer = outer_contours
                .into_iter()
                .fold(Vec::new(), |acc, p| union_ex(&acc, &vec![p]));
            let union_holes = hole_contours
                .into_iter()
                .fold(Vec::new(), |acc, p| union_ex(&acc, &vec![p]));
            let repaired = diff_ex(&union_outer, &union_holes);

            object.layers[i].regions[region_id].slices = repaired
                .into_iter()
                .map(|expolygon| Surface::new(expolygon, SurfaceType::Internal))
                .collect();
        }

        object.layers[i].slicing_errors = false;
        make_slices(&mut object.layers[i]);
        any_repaired = true;
    }

    if any_repaired {
        warn!("one or more layers had slicing errors and were repaired from their neighbors");
    }
}

fn find_nearest(layers: &[Layer], from: usize, count: usize, upward: bool) -> Option<usize> {
    if upward {
        ((from + 1)..count).find(|&j| !layers[j].slicing_errors)
    } else {
        (0..from).rev().find(|&j| !layers[j].slicing_errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::single_region_object;
    use layercore_types::PrintConfig;

    fn square(side: f64) -> ExPolygon {
        ExPolygon::new(vec![(0.0, 0.0), (side, 0.0), (side, side), (0.0, side)])
    }

    #[test]
    fn repairs_errored_layer_from_neighbors() {
        let mut object = single_region_object(&PrintConfig::default(), 1.0);
        let n = object.layers.len();
        assert!(n >= 3);
        let mid = n / 2;

        object.layers[mid - 1].regions[0].slices = vec![Surface::new(square(10.0), SurfaceType::Internal)];
        object.layers[mid + 1].regions[0].slices = vec![Surface::new(square(10.0), SurfaceType::Internal)];
        object.layers[mid].slicing_errors = true;

        repair_layers(&mut object);

        assert!(!object.layers[mid].slicing_errors);
        assert!(!object.layers[mid].regions[0].slices.is_empty());
    }

    #[test]
    fn no_repair_needed_leaves_layers_untouched() {
        let mut object = single_region_object(&PrintConfig::default(), 1.0);
        repair_layers(&mut object);
        assert!(object.layers.iter().all(|l| !l.slicing_errors));
    }
}
