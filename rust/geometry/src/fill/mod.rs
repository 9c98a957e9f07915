// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fill pattern generation (`spec.md` §4.13's infill half, and the fill
//! side of support material generation): turn a [`Surface`] plus a
//! density and a [`Flow`] into a set of [`ExtrusionPath`]s.

mod honeycomb;
mod rectilinear;

pub use honeycomb::HoneycombFiller;
pub use rectilinear::{RectilinearFiller, RectilinearGridFiller};

use layercore_types::{ExtrusionPath, Flow, Surface};

/// A strategy for covering a surface's area with extrusion paths at a
/// target density. One implementation per [`layercore_types::FillPattern`]
/// variant.
pub trait Filler {
    /// Fill direction in radians, used both to generate this filler's own
    /// lines and (by callers) to alternate direction layer-to-layer so
    /// consecutive layers don't stack fill lines directly on top of each
    /// other.
    fn angle(&self) -> f64;

    /// Generate extrusion paths covering `surface` at the given density
    /// (0.0-1.0) using `flow` for width/spacing.
    fn fill_surface(&self, surface: &Surface, density: f64, flow: Flow) -> Vec<ExtrusionPath>;
}

/// Select a filler for a configured pattern and angle. `spec.md` never
/// picks a concrete default angle for a given pattern by itself; per-layer
/// alternation (to avoid weak Z-seams stacking) is the caller's
/// responsibility, typically alternating between `base_angle` and
/// `base_angle + FRAC_PI_2`.
pub fn filler_for(pattern: layercore_types::FillPattern, base_angle: f64) -> Box<dyn Filler> {
    use layercore_types::FillPattern;
    match pattern {
        FillPattern::Rectilinear => Box::new(RectilinearFiller::new(base_angle)),
        FillPattern::RectilinearGrid => Box::new(RectilinearGridFiller::new(base_angle)),
        FillPattern::Honeycomb => Box::new(HoneycombFiller::new(base_angle)),
    }
}

/// Shared scanline machinery used by both rectilinear variants and (as an
/// approximation) honeycomb: rotate the surface so fill lines are
/// horizontal, intersect evenly spaced scanlines with the polygon's edges,
/// pair up the crossings by the even-odd rule, and rotate the resulting
/// segments back.
pub(crate) mod scan {
    use layercore_types::{Contour, ExPolygon, Point2};

    pub fn rotate(point: Point2, angle: f64) -> Point2 {
        let (sin, cos) = angle.sin_cos();
        (point.0 * cos - point.1 * sin, point.0 * sin + point.1 * cos)
    }

    pub fn rotate_contour(contour: &Contour, angle: f64) -> Contour {
        contour.iter().map(|&p| rotate(p, angle)).collect()
    }

    /// Crossings of a horizontal line `y = scan_y` with a contour's edges,
    /// as x-coordinates, in the order the edges appear (unsorted).
    fn crossings(contour: &Contour, scan_y: f64) -> Vec<f64> {
        let n = contour.len();
        let mut xs = Vec::new();
        for i in 0..n {
            let (x0, y0) = contour[i];
            let (x1, y1) = contour[(i + 1) % n];
            if (y0 <= scan_y && y1 > scan_y) || (y0 > scan_y && y1 <= scan_y) {
                let t = (scan_y - y0) / (y1 - y0);
                xs.push(x0 + t * (x1 - x0));
            }
        }
        xs
    }

    /// The solid intervals `[x_in, x_out]` a scanline at `scan_y` covers
    /// inside `expolygon` (outer minus holes), via the even-odd rule over
    /// all contours' crossings pooled together.
    pub fn scan_intervals(expolygon: &ExPolygon, scan_y: f64) -> Vec<(f64, f64)> {
        let mut xs = crossings(&expolygon.outer, scan_y);
        for hole in &expolygon.holes {
            xs.extend(crossings(hole, scan_y));
        }
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        xs.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect()
    }

    pub fn bounds(contour: &Contour) -> (f64, f64, f64, f64) {
        let mut xmin = f64::MAX;
        let mut xmax = f64::MIN;
        let mut ymin = f64::MAX;
        let mut ymax = f64::MIN;
        for &(x, y) in contour {
            xmin = xmin.min(x);
            xmax = xmax.max(x);
            ymin = ymin.min(y);
            ymax = ymax.max(y);
        }
        (xmin, xmax, ymin, ymax)
    }
}
