// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors the pipeline orchestrator can raise. Per-layer problems
/// (`slicing_errors`, empty results) are not modeled as errors — they are
/// recorded on the data and surfaced as [`crate::SliceWarnings`] instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Stage 2 produced no layers with any segments at all.
    #[error("invalid input: slicing produced no layers")]
    InvalidMesh,

    #[error(transparent)]
    Geometry(#[from] layercore_geometry::Error),

    #[error(transparent)]
    Types(#[from] layercore_types::Error),
}
