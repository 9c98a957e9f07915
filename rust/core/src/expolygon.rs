// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The expolygon representation shared by the data model and the geometry crate.
//!
//! `layercore-types` stays free of any particular polygon-engine dependency,
//! so an expolygon here is just its mathematical shape: one outer contour
//! plus zero or more holes, both stored as `f64` point lists. `layercore-geometry`
//! converts to/from `geo::Polygon` at the boundary where it calls into `geo`/`geo-offset`.

/// A single 2D point.
pub type Point2 = (f64, f64);

/// One contour: a closed polyline, first point not repeated at the end.
pub type Contour = Vec<Point2>;

/// One region consisting of an outer contour plus zero or more holes.
///
/// Invariant (enforced by the geometry crate, not checked here): `outer` and
/// every entry of `holes` are simple (non-self-intersecting) and `holes` lie
/// within `outer` with no self-overlap.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExPolygon {
    pub outer: Contour,
    pub holes: Vec<Contour>,
}

/// A set of expolygons, e.g. the result of a boolean operation that may
/// split a single input region into disjoint pieces.
pub type ExPolygons = Vec<ExPolygon>;

impl ExPolygon {
    pub fn new(outer: Contour) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    pub fn with_holes(outer: Contour, holes: Vec<Contour>) -> Self {
        Self { outer, holes }
    }

    pub fn is_empty(&self) -> bool {
        self.outer.len() < 3
    }
}
