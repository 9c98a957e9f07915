// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The polygon primitive library the rest of the pipeline is built on.
//!
//! `spec.md` treats `union_ex`, `diff_ex`, `intersection_ex`, `offset_ex`,
//! `is_printable`, `area` and `simplify` as external primitives supplied by
//! a polygon engine. Here that engine is `geo`'s `BooleanOps` (boolean set
//! algebra) plus `geo-offset` (grow/shrink); this module is the thin
//! adapter between [`ExPolygons`] and those two crates, in the same spirit
//! as `bool2d.rs` adapts `i_overlay` to `Profile2D`.

use crate::convert::{from_geo_multi, to_geo_multi};
use crate::error::Result;
use geo::algorithm::area::Area;
use geo::BooleanOps;
use geo_offset::Offset;
use layercore_types::{Contour, ExPolygon, ExPolygons, Point2};

/// Epsilon used consistently wherever two floating-point quantities derived
/// from sliced geometry are compared. `spec.md` §9 asks that whatever
/// epsilon is used be documented and kept consistent; this is it.
pub const EPSILON: f64 = 1e-6;

/// Union of two expolygon sets.
pub fn union_ex(a: &[ExPolygon], b: &[ExPolygon]) -> ExPolygons {
    if a.is_empty() {
        return b.to_vec();
    }
    if b.is_empty() {
        return a.to_vec();
    }
    let result = to_geo_multi(a).union(&to_geo_multi(b));
    from_geo_multi(&result)
}

/// Union of an arbitrary number of expolygon sets.
pub fn union_ex_many<'a, I: IntoIterator<Item = &'a ExPolygons>>(sets: I) -> ExPolygons {
    sets.into_iter()
        .fold(Vec::new(), |acc, set| union_ex(&acc, set))
}

/// Set difference `a - b`.
pub fn diff_ex(a: &[ExPolygon], b: &[ExPolygon]) -> ExPolygons {
    if a.is_empty() || b.is_empty() {
        return a.to_vec();
    }
    let result = to_geo_multi(a).difference(&to_geo_multi(b));
    from_geo_multi(&result)
}

/// Set intersection `a ∩ b`.
pub fn intersection_ex(a: &[ExPolygon], b: &[ExPolygon]) -> ExPolygons {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let result = to_geo_multi(a).intersection(&to_geo_multi(b));
    from_geo_multi(&result)
}

/// Grow (`distance > 0`) or shrink (`distance < 0`) every expolygon in the
/// set by `distance`.
///
/// `geo-offset` only operates on a single polygon at a time and only grows;
/// shrinking is implemented as the common idiom of negating the distance
/// and inverting the resulting containment (offsetting the holes outward
/// and the outer contour... in practice `geo-offset`'s `Offset::offset`
/// already accepts a signed distance and handles holes correctly, so we
/// pass `distance` straight through per polygon and re-union the pieces).
pub fn offset_ex(polys: &[ExPolygon], distance: f64) -> Result<ExPolygons> {
    if polys.is_empty() || distance == 0.0 {
        return Ok(polys.to_vec());
    }
    let mut grown = Vec::new();
    for expolygon in polys {
        let polygon = crate::convert::to_geo_polygon(expolygon);
        let offset = polygon
            .offset(distance)
            .map_err(|e| crate::error::Error::OffsetFailed(format!("{e:?}")))?;
        grown.extend(from_geo_multi(&offset));
    }
    // Offsetting each piece independently can leave overlaps where two
    // originally-separate expolygons grow into each other; unioning the set
    // with itself collapses those overlaps the same way the original
    // engine's `offset2_ex` documents.
    Ok(union_ex(&grown, &grown))
}

/// `offset_ex` in then back out by the same distance — the "close" idiom
/// used throughout the spec to both grow and shrink in one step (e.g. the
/// extra-perimeter band test, or `offset_ex(2*d)` after `offset_ex(-d)` in
/// the support sweep). `spec.md` §9 notes that chaining two offsets this
/// way can leave slight asymmetry from rounding; that asymmetry is bounded
/// by [`EPSILON`] here since both offsets go through the same code path.
pub fn offset2_ex(polys: &[ExPolygon], first: f64, second: f64) -> Result<ExPolygons> {
    offset_ex(&offset_ex(polys, first)?, second)
}

/// Total unsigned area of an expolygon set (outer contours minus holes).
pub fn area(polys: &[ExPolygon]) -> f64 {
    polys.iter().map(area_of).sum()
}

fn area_of(expolygon: &ExPolygon) -> f64 {
    let polygon = crate::convert::to_geo_polygon(expolygon);
    polygon.unsigned_area()
}

/// Whether `polys` admits at least one full perimeter loop at the given
/// extrusion width, approximated (as in `spec.md` §4.7's printability
/// filter) by checking that insetting by half the perimeter width still
/// leaves a non-degenerate area.
pub fn is_printable(polys: &[ExPolygon], perimeter_width: f64) -> bool {
    match offset_ex(polys, -perimeter_width / 2.0) {
        Ok(inset) => area(&inset) > EPSILON,
        Err(_) => false,
    }
}

/// Remove near-collinear vertices from a contour (Slic3r's `simplify`,
/// generalized from `bool2d::simplify_contour`).
pub fn simplify_contour(contour: &Contour, epsilon: f64) -> Contour {
    if contour.len() <= 3 {
        return contour.clone();
    }

    let n = contour.len();
    let mut result = Vec::with_capacity(n);
    for i in 0..n {
        let prev: Point2 = contour[(i + n - 1) % n];
        let curr: Point2 = contour[i];
        let next: Point2 = contour[(i + 1) % n];

        let cross = (curr.0 - prev.0) * (next.1 - prev.1) - (curr.1 - prev.1) * (next.0 - prev.0);
        if cross.abs() > epsilon {
            result.push(curr);
        }
    }

    if result.len() < 3 {
        contour.clone()
    } else {
        result
    }
}

/// Simplify every contour and hole of every expolygon in the set.
pub fn simplify_ex(polys: &[ExPolygon], epsilon: f64) -> ExPolygons {
    polys
        .iter()
        .map(|expolygon| ExPolygon {
            outer: simplify_contour(&expolygon.outer, epsilon),
            holes: expolygon
                .holes
                .iter()
                .map(|hole| simplify_contour(hole, epsilon))
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, side: f64) -> ExPolygon {
        ExPolygon::new(vec![
            (x0, y0),
            (x0 + side, y0),
            (x0 + side, y0 + side),
            (x0, y0 + side),
        ])
    }

    #[test]
    fn union_of_disjoint_squares_keeps_both() {
        let a = vec![square(0.0, 0.0, 1.0)];
        let b = vec![square(5.0, 5.0, 1.0)];
        let result = union_ex(&a, &b);
        assert!((area(&result) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn diff_removes_overlap() {
        let a = vec![square(0.0, 0.0, 10.0)];
        let b = vec![square(0.0, 0.0, 5.0)];
        let result = diff_ex(&a, &b);
        assert!((area(&result) - 75.0).abs() < 1e-6);
    }

    #[test]
    fn intersection_of_overlapping_squares() {
        let a = vec![square(0.0, 0.0, 10.0)];
        let b = vec![square(5.0, 5.0, 10.0)];
        let result = intersection_ex(&a, &b);
        assert!((area(&result) - 25.0).abs() < 1e-6);
    }

    #[test]
    fn shrinking_past_the_inradius_empties_the_polygon() {
        let a = vec![square(0.0, 0.0, 1.0)];
        let shrunk = offset_ex(&a, -10.0).unwrap();
        assert!(area(&shrunk) < EPSILON);
    }

    #[test]
    fn wide_square_is_printable_narrow_sliver_is_not() {
        let wide = vec![square(0.0, 0.0, 5.0)];
        assert!(is_printable(&wide, 0.4));

        let sliver = vec![square(0.0, 0.0, 0.05)];
        assert!(!is_printable(&sliver, 0.4));
    }

    #[test]
    fn simplify_drops_collinear_points() {
        let contour = vec![(0.0, 0.0), (5.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
        let simplified = simplify_contour(&contour, 1e-6);
        assert_eq!(simplified.len(), 4);
    }
}
