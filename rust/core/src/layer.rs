// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-layer and per-(layer, region) containers.

use crate::expolygon::{ExPolygons, Point2};
use crate::flow::Flow;
use crate::surface::Surface;

/// An unordered 2D line segment, as produced by intersecting one facet with
/// one layer plane (§4.2). Lives only between stage 2 and stage 3.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Point2,
    pub b: Point2,
}

/// An extrusion path: an ordered polyline plus the flow it was generated
/// for. Toolpath emission (turning this into G-code) is out of scope here;
/// this is as far as the layer analysis core goes.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtrusionPath {
    pub polyline: Vec<Point2>,
    pub flow: Flow,
    pub is_closed: bool,
}

/// The portion of a [`Layer`] belonging to one material region.
#[derive(Debug, Clone, Default)]
pub struct LayerRegion {
    /// Transient segments from facet slicing. `None` once loop assembly has
    /// consumed them (§3 Lifecycle: "lines live only during slicing").
    pub lines: Option<Vec<Segment>>,
    /// Typed surfaces partitioning this region's share of the layer.
    pub slices: Vec<Surface>,
    /// Typed surfaces still to be filled, clipped to fill boundaries.
    pub fill_surfaces: Vec<Surface>,
    pub perimeters: Vec<ExtrusionPath>,
    pub thin_fills: Vec<ExtrusionPath>,
    pub thin_walls: Vec<ExtrusionPath>,
    pub perimeter_flow: Flow,
    pub infill_flow: Flow,
    pub solid_infill_flow: Flow,
    /// Area (in the units of the containing expolygons, squared) below
    /// which a fill surface is dropped as noise rather than filled.
    pub infill_area_threshold: f64,
    /// How far inward an overhang can be reached by the layer below before
    /// it needs support, used by `infill_only_where_needed` (§4.11).
    pub overhang_width: f64,
}

impl LayerRegion {
    pub fn new(perimeter_flow: Flow, infill_flow: Flow, solid_infill_flow: Flow) -> Self {
        Self {
            lines: Some(Vec::new()),
            slices: Vec::new(),
            fill_surfaces: Vec::new(),
            perimeters: Vec::new(),
            thin_fills: Vec::new(),
            thin_walls: Vec::new(),
            perimeter_flow,
            infill_flow,
            solid_infill_flow,
            infill_area_threshold: 0.0,
            overhang_width: 0.0,
        }
    }

    /// Release the transient segment buffer (§3 Lifecycle, §5 resource policy).
    pub fn drop_lines(&mut self) {
        self.lines = None;
    }

    pub fn slice_expolygons(&self) -> ExPolygons {
        self.slices.iter().map(|s| s.expolygon.clone()).collect()
    }

    pub fn fill_expolygons_of(&self, surface_type: crate::surface::SurfaceType) -> ExPolygons {
        self.fill_surfaces
            .iter()
            .filter(|s| s.surface_type == surface_type)
            .map(|s| s.expolygon.clone())
            .collect()
    }
}

/// A horizontal cross-section of the object at a fixed Z.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Index into the object's layer list. Reassigned on layer removal so
    /// that `id == index` always holds (invariant, §3).
    pub id: usize,
    /// Z height at which facets are intersected to produce this layer.
    pub slice_z: f64,
    /// Z height at which this layer is printed (top of the layer).
    pub print_z: f64,
    pub height: f64,
    /// Set by loop assembly (§4.3) when reconstruction was topologically
    /// inconsistent; cleared once stage 4 repairs the layer.
    pub slicing_errors: bool,
    pub regions: Vec<LayerRegion>,
    /// Union of all regions' slices: the whole-layer islands (§4.4).
    pub slices: ExPolygons,

    // Support-material outputs (§4.13), populated by the support stage only.
    pub support_regions: ExPolygons,
    pub interfaces: ExPolygons,
    pub contact_areas: ExPolygons,
    pub support_islands: ExPolygons,
    pub support_fills: Vec<ExtrusionPath>,
    pub support_contact_fills: Vec<ExtrusionPath>,
}

impl Layer {
    pub fn new(id: usize, slice_z: f64, print_z: f64, height: f64, region_count: usize) -> Self {
        Self {
            id,
            slice_z,
            print_z,
            height,
            slicing_errors: false,
            regions: (0..region_count).map(|_| LayerRegion::default()).collect(),
            slices: Vec::new(),
            support_regions: Vec::new(),
            interfaces: Vec::new(),
            contact_areas: Vec::new(),
            support_islands: Vec::new(),
            support_fills: Vec::new(),
            support_contact_fills: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty() && self.regions.iter().all(|r| r.thin_walls.is_empty())
    }
}
