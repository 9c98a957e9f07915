// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stage 1: Layer Construction (`spec.md` §4.1).

use layercore_types::{Flow, FlowRole, Layer, LayerRegion, PrintConfig, PrintObject};
use tracing::debug;

/// A region's default overhang reach: how far inward the layer below can
/// support an overhang before support material is needed (`spec.md`
/// §4.13's "region's default overhang width if no threshold configured",
/// also used directly by §4.11's fill clipping).
pub(crate) fn default_overhang_width(config: &PrintConfig) -> f64 {
    if config.support_material_threshold > 0.0 {
        let theta = (config.support_material_threshold + 1.0).to_radians();
        config.layer_height * theta.cos() / theta.sin()
    } else {
        config.layer_height * 2.0
    }
}

/// Build one region's worth of flows and derived thresholds from `config`.
/// Every stage downstream treats `Flow`/`infill_area_threshold`/
/// `overhang_width` as inputs already resolved by the time it runs, so
/// this is the one place that derives them from `config`.
fn region_for(config: &PrintConfig, height: f64) -> LayerRegion {
    let width = config.nozzle_diameter;
    let perimeter_flow = Flow::new(FlowRole::Perimeter, width, height);
    let infill_flow = Flow::new(FlowRole::Infill, width, height);
    let solid_infill_flow = Flow::new(FlowRole::SolidInfill, width, height);

    let mut region = LayerRegion::new(perimeter_flow, infill_flow, solid_infill_flow);
    // A fill surface smaller than one extrusion line's footprint is noise,
    // not infill (`spec.md` §4.9/§4.12's infill-area threshold).
    region.infill_area_threshold = infill_flow.spacing * infill_flow.spacing;
    region.overhang_width = default_overhang_width(config);
    region
}

/// Allocate empty layers at evenly spaced Z heights covering `[0,
/// object_height]`, each with one region per mesh already seeded with
/// config-derived flows. The loop always produces one layer beyond the
/// last Z height below `object_height` — a trailing empty layer, pruned by
/// [`prune_trailing_empty_layer`] once stage 3 has populated `slices`.
pub fn construct_layers(config: &PrintConfig, object_height: f64, region_count: usize) -> Vec<Layer> {
    let mut layers = Vec::new();
    let mut id = 0usize;
    let mut height = config.first_layer_height;
    let mut slice_z = height / 2.0;
    let mut print_z = height;

    loop {
        let mut layer = Layer::new(id, slice_z, print_z, height, region_count);
        layer.regions = (0..region_count).map(|_| region_for(config, height)).collect();
        layers.push(layer);
        if slice_z >= object_height {
            break;
        }
        id += 1;
        height = config.layer_height;
        slice_z += height;
        print_z += height;
    }

    debug!(count = layers.len(), object_height, "constructed layers");
    layers
}

/// Drop the trailing layer if it ended up with no slices at all, and
/// renumber so `id == index` again.
pub fn prune_trailing_empty_layer(object: &mut PrintObject) {
    if matches!(object.layers.last(), Some(layer) if layer.is_empty()) {
        object.layers.pop();
        object.renumber_layers();
        debug!("pruned trailing empty layer");
    }
}
