// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Layercore Geometry
//!
//! The polygon engine, mesh-slicing, and fill-pattern primitives the layer
//! analysis pipeline ([`layercore_processing`](../layercore_processing/index.html))
//! is built from:
//!
//! - [`primitives`]: `union_ex`, `diff_ex`, `intersection_ex`, `offset_ex`,
//!   `area`, `is_printable`, `simplify_ex` — the polygon set-algebra
//!   `spec.md` treats as externally supplied.
//! - [`mesh`] / [`slicing`]: the `TriangleMesh` facade and facet-plane
//!   intersection.
//! - [`loops`]: stitching sliced segments into closed, classified expolygons.
//! - [`fill`]: fill pattern generation for infill and support.

pub mod convert;
pub mod error;
pub mod fill;
pub mod loops;
pub mod mesh;
pub mod primitives;
pub mod slicing;

pub use error::{Error, Result};
pub use fill::{filler_for, Filler};
pub use loops::{assemble_loops, loops_to_expolygons, segments_to_expolygons};
pub use mesh::{Facet, IndexedMesh, TriangleMesh};
pub use primitives::{
    area, diff_ex, intersection_ex, is_printable, offset2_ex, offset_ex, simplify_contour,
    simplify_ex, union_ex, union_ex_many, EPSILON,
};
pub use slicing::{slice_facet_at_z, slice_mesh, PARALLEL_FACET_THRESHOLD};
