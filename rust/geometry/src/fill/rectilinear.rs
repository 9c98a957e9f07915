// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::scan;
use super::Filler;
use layercore_types::{ExPolygon, ExtrusionPath, Flow, Surface};
use std::f64::consts::FRAC_PI_2;

/// Straight parallel lines at a single angle, spaced according to density.
pub struct RectilinearFiller {
    angle: f64,
}

impl RectilinearFiller {
    pub fn new(angle: f64) -> Self {
        Self { angle }
    }
}

impl Filler for RectilinearFiller {
    fn angle(&self) -> f64 {
        self.angle
    }

    fn fill_surface(&self, surface: &Surface, density: f64, flow: Flow) -> Vec<ExtrusionPath> {
        one_direction(surface, density, flow, self.angle)
    }
}

/// Two rectilinear passes at 90 degrees to each other, forming a grid.
pub struct RectilinearGridFiller {
    angle: f64,
}

impl RectilinearGridFiller {
    pub fn new(angle: f64) -> Self {
        Self { angle }
    }
}

impl Filler for RectilinearGridFiller {
    fn angle(&self) -> f64 {
        self.angle
    }

    fn fill_surface(&self, surface: &Surface, density: f64, flow: Flow) -> Vec<ExtrusionPath> {
        // Each pass alone covers the surface at half the requested density
        // so the combined grid matches the target line spacing overall.
        let half_density = (density / 2.0).max(0.0);
        let mut paths = one_direction(surface, half_density, flow, self.angle);
        paths.extend(one_direction(surface, half_density, flow, self.angle + FRAC_PI_2));
        paths
    }
}

/// Fill `surface` with parallel lines at `angle`, spaced `flow.spacing /
/// density` apart (solid infill is density 1.0, giving lines exactly
/// `flow.spacing` apart with no gaps between extrusion beads).
///
/// One `ExtrusionPath` per scanline segment. Real slicers chain same-row
/// segments into a single zigzag path per island to minimize travel moves;
/// that's a wall-clock optimization on top of this, not a correctness
/// requirement, and is left as a later pass over the returned paths.
fn one_direction(surface: &Surface, density: f64, flow: Flow, angle: f64) -> Vec<ExtrusionPath> {
    if density <= 0.0 || surface.expolygon.outer.len() < 3 {
        return Vec::new();
    }
    let spacing = flow.spacing / density.min(1.0);
    if !spacing.is_finite() || spacing <= 0.0 {
        return Vec::new();
    }

    let rotated = ExPolygon::with_holes(
        scan::rotate_contour(&surface.expolygon.outer, -angle),
        surface
            .expolygon
            .holes
            .iter()
            .map(|hole| scan::rotate_contour(hole, -angle))
            .collect(),
    );
    let (_, _, ymin, ymax) = scan::bounds(&rotated.outer);

    let mut paths = Vec::new();
    let mut y = ymin + spacing / 2.0;
    let mut forward = true;
    while y <= ymax {
        for (x0, x1) in scan::scan_intervals(&rotated, y) {
            let (start, end) = if forward { (x0, x1) } else { (x1, x0) };
            let polyline = vec![
                scan::rotate((start, y), angle),
                scan::rotate((end, y), angle),
            ];
            paths.push(ExtrusionPath {
                polyline,
                flow,
                is_closed: false,
            });
        }
        y += spacing;
        forward = !forward;
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use layercore_types::{FlowRole, SurfaceType};

    fn square_surface(side: f64) -> Surface {
        let expolygon = ExPolygon::new(vec![
            (0.0, 0.0),
            (side, 0.0),
            (side, side),
            (0.0, side),
        ]);
        Surface::new(expolygon, SurfaceType::InternalSolid)
    }

    #[test]
    fn denser_infill_produces_more_lines() {
        let surface = square_surface(20.0);
        let flow = Flow::new(FlowRole::SolidInfill, 0.4, 0.2);
        let sparse = RectilinearFiller::new(0.0).fill_surface(&surface, 0.2, flow);
        let dense = RectilinearFiller::new(0.0).fill_surface(&surface, 0.8, flow);
        assert!(dense.len() > sparse.len());
    }

    #[test]
    fn grid_filler_produces_lines_in_two_directions() {
        let surface = square_surface(20.0);
        let flow = Flow::new(FlowRole::SolidInfill, 0.4, 0.2);
        let grid = RectilinearGridFiller::new(0.0).fill_surface(&surface, 1.0, flow);
        assert!(!grid.is_empty());
    }

    #[test]
    fn zero_density_yields_no_paths() {
        let surface = square_surface(20.0);
        let flow = Flow::new(FlowRole::SolidInfill, 0.4, 0.2);
        let paths = RectilinearFiller::new(0.0).fill_surface(&surface, 0.0, flow);
        assert!(paths.is_empty());
    }
}
