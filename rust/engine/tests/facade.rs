// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Facade-level integration test: a caller linking against
//! `layercore-engine` wires up its own `tracing` subscriber (this crate
//! never does), then calls [`layercore_engine::slice_object`] exactly as
//! a CLI or server would.

use layercore_engine::{slice_object, IndexedMesh, PrintConfig, Size};

#[test]
fn caller_initializes_logging_and_slices_an_object() {
    let _ = tracing_subscriber::fmt().with_env_filter("layercore=debug").try_init();

    let config = PrintConfig {
        support_material: true,
        fill_density: 0.2,
        top_solid_layers: 2,
        bottom_solid_layers: 2,
        ..PrintConfig::default()
    };
    let cube = IndexedMesh::cuboid(10.0, 10.0, 4.0);
    let size = Size { x: 10.0, y: 10.0, z: 4.0 };

    let (object, warnings) = slice_object(&config, size, &[&cube]).unwrap();

    assert!(!warnings.empty_result);
    assert!(object.check_monotonic_layering());
    assert!(object.layers.iter().any(|l| !l.regions[0].fill_surfaces.is_empty()));
}
