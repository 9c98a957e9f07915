// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The object-level container the pipeline operates on.

use crate::layer::Layer;

/// Bounding box size, in object-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Where one instance of the object is placed on the bed. Only an XY offset
/// matters to the layer analysis core; bed packing and rotation live with
/// the caller.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
}

/// One object to be sliced: one mesh per material region, one or more bed
/// copies, and the layer stack the pipeline builds up.
///
/// `PrintObject` owns its layers exclusively. The parent print (if any) is
/// referenced by the caller without ownership — this crate has no notion of
/// "the print" at all, only of one object at a time, so there is no
/// back-pointer to model.
#[derive(Debug, Clone, Default)]
pub struct PrintObject {
    pub size: Size,
    pub copies: Vec<Placement>,
    pub layers: Vec<Layer>,
    /// True once meshes have been released after stage 2 (§3 Lifecycle).
    pub meshes_released: bool,
}

impl PrintObject {
    pub fn new(size: Size, copies: Vec<Placement>) -> Self {
        Self {
            size,
            copies,
            layers: Vec::new(),
            meshes_released: false,
        }
    }

    /// Renumber `layer.id` to match each layer's position in `layers`.
    /// Called whenever layers are removed (§3: "`id` ... reassigned on
    /// layer removal").
    pub fn renumber_layers(&mut self) {
        for (index, layer) in self.layers.iter_mut().enumerate() {
            layer.id = index;
        }
    }

    /// `spec.md` §8 monotonic layering invariant: `slice_z` strictly
    /// increases with `id`, and `id == index` everywhere.
    pub fn check_monotonic_layering(&self) -> bool {
        self.layers.iter().enumerate().all(|(i, l)| l.id == i)
            && self.layers.windows(2).all(|w| w[0].slice_z < w[1].slice_z)
    }
}
