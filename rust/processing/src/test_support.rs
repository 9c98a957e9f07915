// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared scaffolding for unit and integration tests: building a
//! [`PrintObject`] with freshly constructed, empty layers ready for
//! [`crate::slice::slice_object`].

#![cfg(test)]

use crate::construct::construct_layers;
use layercore_types::{Placement, PrintConfig, PrintObject, Size};

pub fn single_region_object(config: &PrintConfig, object_height: f64) -> PrintObject {
    n_region_object(config, object_height, 1)
}

pub fn n_region_object(config: &PrintConfig, object_height: f64, regions: usize) -> PrintObject {
    let mut object = PrintObject::new(
        Size {
            x: 100.0,
            y: 100.0,
            z: object_height,
        },
        vec![Placement::default()],
    );
    // `construct_layers` already seeds every region with config-derived
    // flows and thresholds; no need to rebuild layers by hand here.
    object.layers = construct_layers(config, object_height, regions);
    object
}
