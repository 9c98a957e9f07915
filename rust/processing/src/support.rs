// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stage 9: Support Material (`spec.md` §4.13). The largest single stage in
//! the pipeline: a top-down sweep computing bulk/interface/contact support
//! areas per layer, followed by fill pattern emission.

use crate::construct::default_overhang_width;
use layercore_geometry::fill::RectilinearFiller;
use layercore_geometry::{diff_ex, filler_for, offset_ex, simplify_ex, union_ex, Filler, EPSILON};
use layercore_types::{ExPolygons, FillPattern, Flow, FlowRole, Layer, PrintConfig, PrintObject, Surface, SurfaceType};
use rayon::prelude::*;
use std::collections::VecDeque;
use std::f64::consts::FRAC_PI_2;
use tracing::debug;

/// Layer-count threshold above which per-layer fill emission runs across
/// threads. Emission is purely per-layer (the sweep above has already
/// resolved all cross-layer dependencies), so it parallelizes the same way
/// [`layercore_geometry::slice_mesh`] parallelizes per-facet work.
pub const PARALLEL_LAYER_THRESHOLD: usize = 200;

/// Run the top-down support sweep and, if any support area resulted, fill
/// it with the configured pattern.
///
/// Gating: `spec.md` says to "skip unless support is enabled or `i` is
/// within raft / enforcement band"; the enforcement band's effect on a
/// *given layer* is already modeled by step 7's `d = 0` inside the
/// enforcement band, so here the coarser gate is: don't run the stage at
/// all unless support is enabled, a raft is configured, or enforcement
/// layers are configured — any of which implies some layer could need a
/// support area.
pub fn generate_support_material(object: &mut PrintObject, config: &PrintConfig) {
    let layer_count = object.layers.len();
    if layer_count == 0 {
        return;
    }
    if !config.support_material && config.raft_layers == 0 && config.support_material_enforce_layers == 0 {
        return;
    }

    let flow_width = config.nozzle_diameter;
    let distance_from_object = 1.5 * flow_width;
    let overhang_width = default_overhang_width(config);
    let interface_layers = config.support_material_interface_layers.max(1);

    let mut upper_overhangs: VecDeque<ExPolygons> = VecDeque::from(vec![Vec::new(); interface_layers]);
    let mut current_support: ExPolygons = Vec::new();

    for i in (0..layer_count).rev() {
        let layer_slices = object.layers[i].slices.clone();
        let off = offset_ex(&layer_slices, distance_from_object).unwrap_or_default();

        let last_overhang = upper_overhangs.back().cloned().unwrap_or_default();
        let contact = simplify_ex(&diff_ex(&last_overhang, &off), config.support_material_spacing.max(EPSILON));

        let older_overhangs = upper_overhangs
            .iter()
            .take(upper_overhangs.len().saturating_sub(1))
            .cloned()
            .fold(Vec::new(), |acc, set| union_ex(&acc, &set));
        let interfaces = diff_ex(&older_overhangs, &union_ex(&off, &contact));

        current_support = diff_ex(&union_ex(&current_support, &last_overhang), &layer_slices);
        let support_regions = diff_ex(&current_support, &union_ex(&off, &interfaces));

        object.layers[i].contact_areas = contact;
        object.layers[i].interfaces = interfaces;
        object.layers[i].support_regions = support_regions;

        let d = if i < config.support_material_enforce_layers {
            0.0
        } else {
            overhang_width
        };
        let lower_slices = if i > 0 { object.layers[i - 1].slices.clone() } else { Vec::new() };
        let inset = offset_ex(&layer_slices, -d).unwrap_or_default();
        let overhang = diff_ex(&inset, &lower_slices);
        let grown_overhang = offset_ex(&overhang, 2.0 * d).unwrap_or(overhang);

        upper_overhangs.push_back(grown_overhang);
        if upper_overhangs.len() > interface_layers {
            upper_overhangs.pop_front();
        }
    }

    let any_support = object
        .layers
        .iter()
        .any(|l| !l.support_regions.is_empty() || !l.interfaces.is_empty() || !l.contact_areas.is_empty());
    if !any_support {
        debug!("support material sweep found no overhangs to support");
        return;
    }

    emit_support_fills(object, config);
    debug!(layers = layer_count, "support material generation complete");
}

fn emit_support_fills(object: &mut PrintObject, config: &PrintConfig) {
    let flow_width = config.nozzle_diameter;
    let bulk_density = (flow_width / config.support_material_spacing).min(1.0);
    let interface_density = if config.support_material_interface_spacing > 0.0 {
        (flow_width / config.support_material_interface_spacing).min(1.0)
    } else {
        1.0
    };
    let angle_count = if config.support_material_pattern == FillPattern::RectilinearGrid {
        2
    } else {
        1
    };
    let base_angle = config.support_material_angle.to_radians();
    let pattern = config.support_material_pattern;
    let contact_height = config.support_material_contact_height;

    let fill_one = move |i: usize, layer: &mut Layer| {
        emit_layer_fills(
            layer,
            i,
            flow_width,
            bulk_density,
            interface_density,
            angle_count,
            base_angle,
            pattern,
            contact_height,
        )
    };

    if object.layers.len() >= PARALLEL_LAYER_THRESHOLD {
        object
            .layers
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, layer)| fill_one(i, layer));
    } else {
        object.layers.iter_mut().enumerate().for_each(|(i, layer)| fill_one(i, layer));
    }
}

#[allow(clippy::too_many_arguments)]
fn emit_layer_fills(
    layer: &mut Layer,
    i: usize,
    flow_width: f64,
    bulk_density: f64,
    interface_density: f64,
    angle_count: usize,
    base_angle: f64,
    pattern: FillPattern,
    contact_height: f64,
) {
    if layer.support_regions.is_empty() && layer.interfaces.is_empty() && layer.contact_areas.is_empty() {
        layer.support_islands = Vec::new();
        return;
    }

    if i == 0 {
        let island = union_ex(&union_ex(&layer.support_regions, &layer.interfaces), &layer.contact_areas);
        let base_flow = Flow::new(FlowRole::Support, flow_width, layer.height);
        let filler = RectilinearFiller::new(base_angle);
        let mut fills = Vec::new();
        for expolygon in &island {
            fills.extend(filler.fill_surface(&Surface::new(expolygon.clone(), SurfaceType::Internal), 0.5, base_flow));
        }
        layer.support_fills = fills;
        layer.support_contact_fills = Vec::new();
        layer.support_islands = island;
        return;
    }

    let angle = base_angle + (i % angle_count) as f64 * FRAC_PI_2;
    let bulk_filler = support_filler(pattern, angle);
    let interface_filler = support_filler(pattern, angle);

    let support_flow = Flow::new(FlowRole::Support, flow_width, layer.height);
    let interface_flow = Flow::new(FlowRole::SupportInterface, flow_width, layer.height);
    let contact_flow = Flow::new(FlowRole::SupportInterface, flow_width, contact_height);

    let mut fills = Vec::new();
    for expolygon in &layer.support_regions {
        fills.extend(bulk_filler.fill_surface(
            &Surface::new(expolygon.clone(), SurfaceType::Internal),
            bulk_density,
            support_flow,
        ));
    }
    for expolygon in &layer.interfaces {
        fills.extend(interface_filler.fill_surface(
            &Surface::new(expolygon.clone(), SurfaceType::Internal),
            interface_density,
            interface_flow,
        ));
    }
    layer.support_fills = fills;

    let mut contact_fills = Vec::new();
    for expolygon in &layer.contact_areas {
        contact_fills.extend(interface_filler.fill_surface(
            &Surface::new(expolygon.clone(), SurfaceType::Internal),
            interface_density,
            contact_flow,
        ));
    }
    layer.support_contact_fills = contact_fills;

    layer.support_islands = union_ex(&union_ex(&layer.support_regions, &layer.interfaces), &layer.contact_areas);
}

fn support_filler(pattern: FillPattern, angle: f64) -> Box<dyn Filler> {
    match pattern {
        // The general infill grid filler fills both directions every
        // layer; support's "rectilinear-grid alternates" wording instead
        // wants a single direction that flips between layers.
        FillPattern::RectilinearGrid => Box::new(RectilinearFiller::new(angle)),
        other => filler_for(other, angle),
    }
}
