// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Facet slicing (`spec.md` §4.2): intersect every facet of a mesh against
//! every layer plane it spans, producing the raw, unordered segments that
//! loop assembly later stitches into closed polylines.

use crate::mesh::{Facet, TriangleMesh};
use layercore_types::Segment;
use nalgebra::Point3;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// Facet count at or above which slicing fans out across threads. Below
/// this, per-facet parallelism overhead outweighs the work.
pub const PARALLEL_FACET_THRESHOLD: usize = 500;

/// Intersect a single facet against a single horizontal plane at `z`.
///
/// A triangle crossing a plane always has exactly one edge where z
/// increases through the plane ("entry") and one where it decreases
/// through it ("exit"), except in degenerate cases where a whole edge lies
/// in-plane. Always returning `Segment { a: entry, b: exit }` keeps the
/// segment's direction consistent with the facet's winding regardless of
/// which edge is visited first, which is what loop assembly depends on to
/// tell exterior boundaries from holes.
pub fn slice_facet_at_z(facet: &Facet, z: f64) -> Option<Segment> {
    let v = &facet.vertices;
    let mut entry = None;
    let mut exit = None;

    for i in 0..3 {
        let a = v[i];
        let b = v[(i + 1) % 3];
        let za = a.z - z;
        let zb = b.z - z;

        if za <= 0.0 && zb > 0.0 {
            entry = Some(interpolate_xy(a, b, za, zb));
        } else if za > 0.0 && zb <= 0.0 {
            exit = Some(interpolate_xy(a, b, za, zb));
        }
    }

    match (entry, exit) {
        (Some(a), Some(b)) => Some(Segment { a, b }),
        _ => None,
    }
}

fn interpolate_xy(a: Point3<f64>, b: Point3<f64>, za: f64, zb: f64) -> (f64, f64) {
    let t = za / (za - zb);
    (a.x + t * (b.x - a.x), a.y + t * (b.y - a.y))
}

/// Slice an entire mesh against a sorted list of layer slice-z heights,
/// returning the segments found at each layer index, keyed by layer index
/// into `layer_z`.
///
/// Mirrors `spec.md` §5's description of the facet-slicing stage: the
/// facet list is partitioned across threads (once it is large enough to be
/// worth it) and each worker's partial `layer index -> segments` map is
/// merged commutatively and associatively, so the result does not depend
/// on how the facets were partitioned.
pub fn slice_mesh(mesh: &dyn TriangleMesh, layer_z: &[f64]) -> FxHashMap<usize, Vec<Segment>> {
    let facets = mesh.facets();
    if facets.len() >= PARALLEL_FACET_THRESHOLD {
        facets
            .par_iter()
            .map(|facet| slice_one_facet(facet, layer_z))
            .reduce(FxHashMap::default, merge_segment_maps)
    } else {
        facets
            .iter()
            .map(|facet| slice_one_facet(facet, layer_z))
            .fold(FxHashMap::default(), |mut acc, partial| {
                merge_into(&mut acc, partial);
                acc
            })
    }
}

fn slice_one_facet(facet: &Facet, layer_z: &[f64]) -> FxHashMap<usize, Vec<Segment>> {
    let (zmin, zmax) = facet.z_range();
    let mut out = FxHashMap::default();
    for (layer_id, &z) in layer_z.iter().enumerate() {
        if z < zmin || z > zmax {
            continue;
        }
        if let Some(segment) = slice_facet_at_z(facet, z) {
            out.entry(layer_id).or_insert_with(Vec::new).push(segment);
        }
    }
    out
}

fn merge_segment_maps(
    mut a: FxHashMap<usize, Vec<Segment>>,
    b: FxHashMap<usize, Vec<Segment>>,
) -> FxHashMap<usize, Vec<Segment>> {
    merge_into(&mut a, b);
    a
}

fn merge_into(a: &mut FxHashMap<usize, Vec<Segment>>, b: FxHashMap<usize, Vec<Segment>>) {
    for (layer_id, mut segments) in b {
        a.entry(layer_id).or_insert_with(Vec::new).append(&mut segments);
    }
}
