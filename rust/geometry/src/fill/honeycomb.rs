// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::scan;
use super::Filler;
use layercore_types::{ExPolygon, ExtrusionPath, Flow, Surface};

/// Honeycomb fill, approximated as three rectilinear passes 60 degrees
/// apart rather than true hexagonal cell walls. This keeps the same
/// scanline machinery the rectilinear fillers use while still producing
/// the characteristic triangular line crossings a honeycomb pattern is
/// chosen for; exact hexagon wall generation is future work.
pub struct HoneycombFiller {
    angle: f64,
}

impl HoneycombFiller {
    pub fn new(angle: f64) -> Self {
        Self { angle }
    }
}

impl Filler for HoneycombFiller {
    fn angle(&self) -> f64 {
        self.angle
    }

    fn fill_surface(&self, surface: &Surface, density: f64, flow: Flow) -> Vec<ExtrusionPath> {
        if density <= 0.0 {
            return Vec::new();
        }
        // Three interleaved passes at a lower per-pass density sum to
        // roughly the requested overall density, same idea as the
        // rectilinear grid filler's two-pass split.
        let per_pass_density = (density / 1.5).max(0.0);
        let mut paths = Vec::new();
        for i in 0..3 {
            let pass_angle = self.angle + std::f64::consts::PI / 3.0 * i as f64;
            paths.extend(one_direction(surface, per_pass_density, flow, pass_angle));
        }
        paths
    }
}

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
    while y <= ymax {
        for (x0, x1) in scan::scan_intervals(&rotated, y) {
            let polyline = vec![scan::rotate((x0, y), angle), scan::rotate((x1, y), angle)];
            paths.push(ExtrusionPath {
                polyline,
                flow,
                is_closed: false,
            });
        }
        y += spacing;
    }
    paths
}
