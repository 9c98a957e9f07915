// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the polygon primitive layer, facet slicing, and
/// fill generation.
#[derive(Error, Debug)]
pub enum Error {
    #[error("offset operation failed: {0}")]
    OffsetFailed(String),

    #[error("triangulation failed: {0}")]
    TriangulationError(String),

    #[error("empty mesh: no facets to slice")]
    EmptyMesh,

    #[error("data-model error: {0}")]
    TypesError(#[from] layercore_types::Error),
}
