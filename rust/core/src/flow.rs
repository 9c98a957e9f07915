// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flow geometry: extrusion width/spacing/height as pure-value inputs to the pipeline.

/// The role a [`Flow`] is computed for. Only used to pick sane defaults; the
/// pipeline itself only ever consumes the resolved `width`/`spacing`/`height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowRole {
    Perimeter,
    Infill,
    SolidInfill,
    TopSolidInfill,
    Support,
    SupportInterface,
}

impl Default for FlowRole {
    fn default() -> Self {
        FlowRole::Perimeter
    }
}

/// Extrusion geometry used to map polygon offsets into physical paths.
///
/// `LayerRegion` holds one `Flow` per role it cares about (perimeter flow,
/// infill flow, ...); the pipeline treats these as pure-value inputs and
/// never mutates them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Flow {
    pub role: FlowRole,
    /// Extrusion width, in the same length units as layer geometry.
    pub width: f64,
    /// Centerline-to-centerline spacing between adjacent extrusions of this flow.
    pub spacing: f64,
    /// Layer height this flow is extruded at.
    pub height: f64,
}

impl Flow {
    pub fn new(role: FlowRole, width: f64, height: f64) -> Self {
        Self {
            role,
            width,
            height,
            spacing: width,
        }
    }

    /// Flow with an explicit (non-default) spacing, e.g. for overlapping
    /// solid infill passes.
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }
}
