// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cross-stage scenario tests (`spec.md` §8 Testable Properties), mirroring
//! the teacher's `rust/geometry/tests/*.rs` layout: one integration-test
//! crate exercising the pipeline end to end rather than one stage at a time.

use approx::assert_relative_eq;
use layercore_geometry::{area, IndexedMesh};
use layercore_processing::bridge::bridge_over_infill;
use layercore_processing::combine::combine_infill;
use layercore_processing::construct::{construct_layers, prune_trailing_empty_layer};
use layercore_processing::pipeline::run;
use layercore_processing::repair::repair_layers;
use layercore_processing::shells::discover_horizontal_shells;
use layercore_processing::slice::slice_object;
use layercore_processing::surface_type::detect_surface_types;
use layercore_types::{ExPolygon, Flow, FlowRole, Layer, LayerRegion, Placement, PrintConfig, PrintObject, Size, Surface, SurfaceType};

fn square(side: f64) -> ExPolygon {
    ExPolygon::new(vec![(0.0, 0.0), (side, 0.0), (side, side), (0.0, side)])
}

fn rect(w: f64, h: f64) -> ExPolygon {
    ExPolygon::new(vec![(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)])
}

fn fresh_region(height: f64) -> LayerRegion {
    LayerRegion::new(
        Flow::new(FlowRole::Perimeter, 0.45, height),
        Flow::new(FlowRole::Infill, 0.45, height),
        Flow::new(FlowRole::SolidInfill, 0.45, height),
    )
}

fn cube_object(config: &PrintConfig, side: f64) -> PrintObject {
    let mesh = IndexedMesh::cuboid(side, side, side);
    let mut object = PrintObject::new(
        Size { x: side, y: side, z: side },
        vec![Placement::default()],
    );
    object.layers = construct_layers(config, side, 1);
    slice_object(&mut object, &[&mesh]).unwrap();
    prune_trailing_empty_layer(&mut object);
    repair_layers(&mut object);
    object
}

#[test]
fn mesh_round_trip_cube() {
    let config = PrintConfig {
        layer_height: 0.2,
        first_layer_height: 0.2,
        ..PrintConfig::default()
    };
    let side = 2.0;
    let object = cube_object(&config, side);

    let expected_layers = (side / 0.2).ceil() as usize;
    assert_eq!(object.layers.len(), expected_layers);

    let full_square = area(&[square(side)]);
    for layer in &object.layers {
        assert_relative_eq!(area(&layer.slices), full_square, epsilon = 1e-6);
    }
}

#[test]
fn partition_invariant_holds_after_surface_typing() {
    let config = PrintConfig {
        layer_height: 0.2,
        first_layer_height: 0.2,
        ..PrintConfig::default()
    };
    let mut object = cube_object(&config, 2.0);
    detect_surface_types(&mut object, &config);

    for layer in &object.layers {
        for region in &layer.regions {
            let partitioned: f64 = region.slices.iter().map(|s| area(std::slice::from_ref(&s.expolygon))).sum();
            let whole = area(&region.slices.iter().map(|s| s.expolygon.clone()).collect::<Vec<_>>());
            assert_relative_eq!(partitioned, whole, epsilon = 1e-6);
        }
    }
}

#[test]
fn monotonic_layering_after_full_pipeline() {
    let config = PrintConfig::default();
    let mesh = IndexedMesh::cuboid(10.0, 10.0, 4.0);
    let size = Size { x: 10.0, y: 10.0, z: 4.0 };
    let (object, _warnings) = run(&config, size, &[&mesh]).unwrap();
    assert!(object.check_monotonic_layering());
}

#[test]
fn idempotent_stages_six_through_nine() {
    let config = PrintConfig {
        top_solid_layers: 2,
        bottom_solid_layers: 2,
        fill_density: 0.2,
        ..PrintConfig::default()
    };
    let mesh = IndexedMesh::cuboid(10.0, 10.0, 4.0);
    let size = Size { x: 10.0, y: 10.0, z: 4.0 };
    let (mut object, _) = run(&config, size, &[&mesh]).unwrap();

    let before: Vec<Vec<Surface>> = object
        .layers
        .iter()
        .map(|l| l.regions.iter().flat_map(|r| r.fill_surfaces.clone()).collect())
        .collect();

    detect_surface_types(&mut object, &config);
    discover_horizontal_shells(&mut object, &config);
    bridge_over_infill(&mut object);
    combine_infill(&mut object, &config);

    let after: Vec<Vec<Surface>> = object
        .layers
        .iter()
        .map(|l| l.regions.iter().flat_map(|r| r.fill_surfaces.clone()).collect())
        .collect();

    for (b, a) in before.iter().zip(after.iter()) {
        let b_area: f64 = b.iter().map(|s| area(std::slice::from_ref(&s.expolygon))).sum();
        let a_area: f64 = a.iter().map(|s| area(std::slice::from_ref(&s.expolygon))).sum();
        assert_relative_eq!(b_area, a_area, epsilon = 1e-6);
    }
}

#[test]
fn shell_discovery_scenario_twenty_layer_cube() {
    let config = PrintConfig {
        layer_height: 0.2,
        first_layer_height: 0.2,
        top_solid_layers: 3,
        bottom_solid_layers: 2,
        fill_density: 0.2,
        ..PrintConfig::default()
    };
    let mut object = cube_object(&config, 4.0);
    assert!(object.layers.len() >= 20);
    detect_surface_types(&mut object, &config);
    discover_horizontal_shells(&mut object, &config);

    let has_internal_solid = |i: usize| {
        object.layers[i].regions[0]
            .fill_surfaces
            .iter()
            .any(|s| s.surface_type == SurfaceType::InternalSolid)
    };
    let has_only_internal = |i: usize| {
        let fills = &object.layers[i].regions[0].fill_surfaces;
        fills.iter().any(|s| s.surface_type == SurfaceType::Internal)
            && !fills.iter().any(|s| s.surface_type == SurfaceType::InternalSolid)
    };

    let last = object.layers.len() - 1;
    assert!(has_internal_solid(last));
    assert!(has_internal_solid(last - 1));
    assert!(has_only_internal(last - 2));

    assert!(has_internal_solid(0));
    assert!(has_only_internal(2));
}

#[test]
fn bridge_detection_scenario_hollow_slab_over_air_gap() {
    let mut object = PrintObject::new(Default::default(), vec![Default::default()]);

    let mut below = Layer::new(0, 0.2, 0.2, 0.2, 1);
    let mut below_region = fresh_region(0.2);
    below_region.fill_surfaces = vec![Surface::new(rect(10.0, 10.0), SurfaceType::Internal)];
    below.regions = vec![below_region];
    object.layers.push(below);

    let mut slab = Layer::new(1, 0.4, 0.4, 0.2, 1);
    let mut slab_region = fresh_region(0.2);
    slab_region.fill_surfaces = vec![Surface::new(rect(10.0, 10.0), SurfaceType::InternalSolid)];
    slab.regions = vec![slab_region];
    object.layers.push(slab);

    bridge_over_infill(&mut object);

    let top = &object.layers[1].regions[0];
    assert!(top.fill_surfaces.iter().any(|s| s.surface_type == SurfaceType::InternalBridge));
    assert!(!top.fill_surfaces.iter().any(|s| s.surface_type == SurfaceType::InternalSolid));
}

#[test]
fn membrane_scenario_thin_disk() {
    let config = PrintConfig {
        layer_height: 0.2,
        first_layer_height: 0.2,
        ..PrintConfig::default()
    };
    let mut object = PrintObject::new(Default::default(), vec![Default::default()]);
    let mut layer = Layer::new(0, 0.1, 0.1, 0.1, 1);
    let mut region = fresh_region(0.1);
    region.slices = vec![Surface::new(square(10.0), SurfaceType::Internal)];
    layer.regions = vec![region];
    layer.slices = vec![square(10.0)];
    object.layers.push(layer);

    detect_surface_types(&mut object, &config);

    let region = &object.layers[0].regions[0];
    let bottom_area: f64 = region
        .slices
        .iter()
        .filter(|s| s.surface_type == SurfaceType::Bottom)
        .map(|s| area(std::slice::from_ref(&s.expolygon)))
        .sum();
    let top_area: f64 = region
        .slices
        .iter()
        .filter(|s| s.surface_type == SurfaceType::Top)
        .map(|s| area(std::slice::from_ref(&s.expolygon)))
        .sum();

    assert_relative_eq!(bottom_area, area(&[square(10.0)]), epsilon = 1e-6);
    assert_relative_eq!(top_area, 0.0, epsilon = 1e-6);
}

#[test]
fn combine_infill_invariant_depth_layers_sum_to_group_size() {
    let mut object = PrintObject::new(Default::default(), vec![Default::default()]);
    for i in 0..6 {
        let mut layer = Layer::new(i, 0.2, 0.2, 0.2, 1);
        let mut region = fresh_region(0.2);
        region.fill_surfaces = vec![Surface::new(square(10.0), SurfaceType::Internal)];
        layer.regions = vec![region];
        object.layers.push(layer);
    }
    let config = PrintConfig {
        infill_every_layers: 3,
        nozzle_diameter: 10.0,
        fill_density: 0.2,
        ..PrintConfig::default()
    };
    combine_infill(&mut object, &config);

    let total_depth: usize = object
        .layers
        .iter()
        .flat_map(|l| l.regions.iter())
        .flat_map(|r| r.fill_surfaces.iter())
        .filter(|s| s.surface_type == SurfaceType::Internal)
        .filter_map(|s| s.depth_layers)
        .sum();
    // Two groups of 3 layers each combine into one depth-3 region apiece.
    assert_eq!(total_depth, 6);
}
