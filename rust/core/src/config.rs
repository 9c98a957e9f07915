// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Print configuration threaded as an immutable value into every pipeline stage.
//!
//! Loading this from a project file or CLI flags is out of scope for this
//! crate; callers build a [`PrintConfig`] however they like and pass it in.

/// Support fill pattern, selected by `support_material_pattern`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillPattern {
    Rectilinear,
    RectilinearGrid,
    Honeycomb,
}

/// Immutable, `Clone`-able print configuration.
///
/// Every field here corresponds to one of the configuration knobs listed in
/// `spec.md` §6. There is no global/thread-local configuration state anywhere
/// in this workspace: every stage function takes `&PrintConfig` explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintConfig {
    /// Nominal layer height.
    pub layer_height: f64,
    /// Height of the first layer (may differ from `layer_height`).
    pub first_layer_height: f64,
    /// Number of raft layers beneath the object; empty layers at indices
    /// below this are never trimmed away.
    pub raft_layers: usize,
    /// Number of perimeter loops per region.
    pub perimeters: usize,
    /// Whether to compute extra-perimeter hints over steep overhangs (§4.8).
    pub extra_perimeters: bool,
    /// Sparse infill density in `[0, 1]`. `0` means no infill at all.
    pub fill_density: f64,
    /// Sparse infill pattern.
    pub fill_pattern: FillPattern,
    /// Number of solid layers below the topmost surface.
    pub top_solid_layers: usize,
    /// Number of solid layers above the bottommost surface.
    pub bottom_solid_layers: usize,
    /// If nonzero, force a fully solid infill layer every N layers.
    pub solid_infill_every_layers: usize,
    /// Combine sparse infill across this many layers at once (1 = disabled).
    pub infill_every_layers: usize,
    /// Only generate infill under areas that actually need support from below.
    pub infill_only_where_needed: bool,
    /// Nozzle diameter, used to cap `infill_every_layers`.
    pub nozzle_diameter: f64,

    /// Enable support-material generation.
    pub support_material: bool,
    /// Overhang angle threshold in degrees, measured from vertical. `0`
    /// means "use the region's default overhang width" instead of a
    /// threshold-derived one.
    pub support_material_threshold: f64,
    pub support_material_pattern: FillPattern,
    /// Fill angle in degrees for the first support pass.
    pub support_material_angle: f64,
    /// Spacing between bulk support lines.
    pub support_material_spacing: f64,
    /// Number of dense interface layers adjacent to the object.
    pub support_material_interface_layers: usize,
    /// Spacing between interface support lines (0 = solid).
    pub support_material_interface_spacing: f64,
    /// Force support generation within this many layers of the object's
    /// base regardless of overhang angle.
    pub support_material_enforce_layers: usize,
    /// Contact layer height, used for the layer directly under an overhang.
    pub support_material_contact_height: f64,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            layer_height: 0.2,
            first_layer_height: 0.2,
            raft_layers: 0,
            perimeters: 2,
            extra_perimeters: false,
            fill_density: 0.2,
            fill_pattern: FillPattern::Rectilinear,
            top_solid_layers: 3,
            bottom_solid_layers: 3,
            solid_infill_every_layers: 0,
            infill_every_layers: 1,
            infill_only_where_needed: false,
            nozzle_diameter: 0.4,
            support_material: false,
            support_material_threshold: 0.0,
            support_material_pattern: FillPattern::RectilinearGrid,
            support_material_angle: 0.0,
            support_material_spacing: 2.0,
            support_material_interface_layers: 3,
            support_material_interface_spacing: 0.2,
            support_material_enforce_layers: 0,
            support_material_contact_height: 0.2,
        }
    }
}
