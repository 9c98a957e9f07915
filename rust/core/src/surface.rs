// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed surfaces: the unit of currency between pipeline stages.

use crate::expolygon::ExPolygon;

/// The role a surface plays within its layer region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceType {
    Top,
    Bottom,
    Internal,
    InternalSolid,
    InternalBridge,
}

impl SurfaceType {
    /// Surfaces that belong to a horizontal shell (top/bottom and their
    /// solidified interior neighbors).
    pub fn is_solid(self) -> bool {
        !matches!(self, SurfaceType::Internal)
    }

    pub fn is_top_or_bottom(self) -> bool {
        matches!(self, SurfaceType::Top | SurfaceType::Bottom)
    }
}

/// A typed, immutable 2D region.
///
/// Surfaces are value objects: stages never mutate one in place, they build
/// a new `Vec<Surface>` and replace the old list wholesale. The one field
/// that genuinely needs in-place update, `additional_inner_perimeters`, is
/// modeled as a plain mutable scalar here rather than a side table, since
/// surfaces in this crate are owned by a single `Vec` per region/layer and
/// never aliased.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub expolygon: ExPolygon,
    pub surface_type: SurfaceType,
    /// Set only on `InternalBridge` surfaces.
    pub bridge_angle: Option<f64>,
    /// Number of layers a combined-infill surface spans (§4.12).
    pub depth_layers: Option<usize>,
    /// Extra perimeter passes recommended over a steep overhang (§4.8).
    pub additional_inner_perimeters: usize,
}

impl Surface {
    pub fn new(expolygon: ExPolygon, surface_type: SurfaceType) -> Self {
        Self {
            expolygon,
            surface_type,
            bridge_angle: None,
            depth_layers: None,
            additional_inner_perimeters: 0,
        }
    }

    pub fn with_bridge_angle(mut self, angle: f64) -> Self {
        self.bridge_angle = Some(angle);
        self
    }

    pub fn with_depth_layers(mut self, depth: usize) -> Self {
        self.depth_layers = Some(depth);
        self
    }

    pub fn retyped(&self, surface_type: SurfaceType) -> Self {
        Self {
            expolygon: self.expolygon.clone(),
            surface_type,
            bridge_angle: self.bridge_angle,
            depth_layers: self.depth_layers,
            additional_inner_perimeters: self.additional_inner_perimeters,
        }
    }
}
