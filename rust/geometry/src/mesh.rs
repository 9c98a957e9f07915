// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The mesh-side half of the external interface (`spec.md` §6): a minimal
//! `TriangleMesh` trait plus an in-memory implementation for tests and
//! callers that already have a loaded mesh. Actually loading meshes (STL
//! parsing, etc.) is out of scope.

use nalgebra::Point3;

/// One triangular facet in object-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facet {
    pub vertices: [Point3<f64>; 3],
}

impl Facet {
    pub fn new(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    pub fn z_range(&self) -> (f64, f64) {
        let (mut lo, mut hi) = (self.vertices[0].z, self.vertices[0].z);
        for v in &self.vertices[1..] {
            lo = lo.min(v.z);
            hi = hi.max(v.z);
        }
        (lo, hi)
    }
}

/// A mesh the facet-slicing stage can consume. One `TriangleMesh` per
/// material region.
pub trait TriangleMesh: Sync {
    fn facets(&self) -> &[Facet];
}

/// A plain in-memory triangle soup. Sufficient for tests and for callers
/// that have already parsed an STL/3MF elsewhere.
#[derive(Debug, Clone, Default)]
pub struct IndexedMesh {
    pub facets: Vec<Facet>,
}

impl IndexedMesh {
    pub fn new(facets: Vec<Facet>) -> Self {
        Self { facets }
    }

    /// An axis-aligned box of size `(sx, sy, sz)` with one corner at the
    /// origin, used throughout the test suite's "mesh round-trip" scenario.
    pub fn cuboid(sx: f64, sy: f64, sz: f64) -> Self {
        let p = |x: f64, y: f64, z: f64| Point3::new(x, y, z);
        let corners = [
            p(0.0, 0.0, 0.0),
            p(sx, 0.0, 0.0),
            p(sx, sy, 0.0),
            p(0.0, sy, 0.0),
            p(0.0, 0.0, sz),
            p(sx, 0.0, sz),
            p(sx, sy, sz),
            p(0.0, sy, sz),
        ];
        // Two triangles per face, wound counter-clockwise viewed from outside.
        let quads: [[usize; 4]; 6] = [
            [0, 3, 2, 1], // bottom (z=0), viewed from below
            [4, 5, 6, 7], // top (z=sz)
            [0, 1, 5, 4], // front (y=0)
            [1, 2, 6, 5], // right (x=sx)
            [2, 3, 7, 6], // back (y=sy)
            [3, 0, 4, 7], // left (x=0)
        ];
        let mut facets = Vec::with_capacity(12);
        for q in quads {
            facets.push(Facet::new(corners[q[0]], corners[q[1]], corners[q[2]]));
            facets.push(Facet::new(corners[q[0]], corners[q[2]], corners[q[3]]));
        }
        Self { facets }
    }
}

impl TriangleMesh for IndexedMesh {
    fn facets(&self) -> &[Facet] {
        &self.facets
    }
}
