// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Layercore Types
//!
//! Data model and configuration for the per-object layer analysis core of an
//! FDM slicer: [`Surface`], [`LayerRegion`], [`Layer`], [`PrintObject`], the
//! expolygon representation, and [`PrintConfig`].
//!
//! This crate owns no algorithms. [`layercore_geometry`](../layercore_geometry/index.html)
//! and [`layercore_processing`](../layercore_processing/index.html) build the
//! layer analysis pipeline on top of these types.

pub mod config;
pub mod error;
pub mod expolygon;
pub mod flow;
pub mod layer;
pub mod object;
pub mod surface;

pub use config::{FillPattern, PrintConfig};
pub use error::{Error, Result};
pub use expolygon::{Contour, ExPolygon, ExPolygons, Point2};
pub use flow::{Flow, FlowRole};
pub use layer::{ExtrusionPath, Layer, LayerRegion, Segment};
pub use object::{Placement, PrintObject, Size};
pub use surface::{Surface, SurfaceType};
