// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stage 5: Empty-Prefix Trim (`spec.md` §4.6).

use layercore_types::{PrintConfig, PrintObject};
use tracing::warn;

/// Remove empty leading layers starting at `config.raft_layers`, stopping
/// at the first non-empty layer. Returns `true` if the object ended up
/// with no layers at all (`spec.md` §7's `EmptyResult`).
pub fn trim_empty_prefix(object: &mut PrintObject, config: &PrintConfig) -> bool {
    let start = config.raft_layers.min(object.layers.len());
    while object.layers.len() > start {
        let layer = &object.layers[start];
        let is_empty = layer.slices.is_empty()
            && layer.regions.iter().all(|region| region.thin_walls.is_empty());
        if !is_empty {
            break;
        }
        object.layers.remove(start);
    }
    object.renumber_layers();

    let empty_result = object.layers.is_empty();
    if empty_result {
        warn!("object has no layers after empty-prefix trim");
    }
    empty_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::single_region_object;
    use layercore_types::{ExPolygon, Surface, SurfaceType};

    fn non_empty(object: &mut PrintObject, index: usize) {
        let square = ExPolygon::new(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        object.layers[index].regions[0].slices = vec![Surface::new(square.clone(), SurfaceType::Internal)];
        object.layers[index].slices = vec![square];
    }

    #[test]
    fn trims_empty_layers_before_first_solid_layer() {
        let config = PrintConfig::default();
        let mut object = single_region_object(&config, 1.0);
        let first_solid = 3;
        non_empty(&mut object, first_solid);
        let before = object.layers.len();

        let empty_result = trim_empty_prefix(&mut object, &config);

        assert!(!empty_result);
        assert_eq!(object.layers.len(), before - first_solid);
        assert_eq!(object.layers[0].id, 0);
        assert!(object.check_monotonic_layering());
    }

    #[test]
    fn all_empty_layers_yields_empty_result() {
        let config = PrintConfig::default();
        let mut object = single_region_object(&config, 1.0);
        let empty_result = trim_empty_prefix(&mut object, &config);
        assert!(empty_result);
        assert!(object.layers.is_empty());
    }
}
