// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conversions between the engine-agnostic [`ExPolygon`] and `geo`'s types.
//!
//! This is the only place in the crate that should construct a
//! `geo::Polygon` directly; every other module works in terms of
//! [`ExPolygons`].

use geo::{LineString, MultiPolygon, Polygon};
use layercore_types::{Contour, ExPolygon, ExPolygons, Point2};

pub fn contour_to_line_string(contour: &Contour) -> LineString<f64> {
    LineString::from(contour.iter().map(|&(x, y)| (x, y)).collect::<Vec<_>>())
}

pub fn line_string_to_contour(line: &LineString<f64>) -> Contour {
    line.points().map(|p| (p.x(), p.y())).collect()
}

pub fn to_geo_polygon(expolygon: &ExPolygon) -> Polygon<f64> {
    let exterior = contour_to_line_string(&expolygon.outer);
    let interiors = expolygon
        .holes
        .iter()
        .map(contour_to_line_string)
        .collect();
    Polygon::new(exterior, interiors)
}

pub fn from_geo_polygon(polygon: &Polygon<f64>) -> ExPolygon {
    ExPolygon::with_holes(
        line_string_to_contour(polygon.exterior()),
        polygon.interiors().iter().map(line_string_to_contour).collect(),
    )
}

pub fn to_geo_multi(expolygons: &[ExPolygon]) -> MultiPolygon<f64> {
    MultiPolygon::new(expolygons.iter().map(to_geo_polygon).collect())
}

pub fn from_geo_multi(multi: &MultiPolygon<f64>) -> ExPolygons {
    multi.iter().map(from_geo_polygon).collect()
}

pub fn point_to_tuple(point: geo::Coord<f64>) -> Point2 {
    (point.x, point.y)
}
