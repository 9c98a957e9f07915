// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for data-model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the data model itself (not the geometry pipeline).
#[derive(Error, Debug)]
pub enum Error {
    #[error("layer index {index} out of range (object has {len} layers)")]
    LayerIndexOutOfRange { index: usize, len: usize },

    #[error("region index {index} out of range (layer has {len} regions)")]
    RegionIndexOutOfRange { index: usize, len: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
